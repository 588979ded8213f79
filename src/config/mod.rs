//! Configuration module for addrbook
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AddrBookPaths;
pub use settings::Settings;
