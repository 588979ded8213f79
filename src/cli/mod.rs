//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer,
//! plus the interactive shell.

pub mod contact;
pub mod export;
pub mod shell;

pub use contact::{handle_contact_command, ContactCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use shell::Shell;
