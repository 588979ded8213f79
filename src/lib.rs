//! addrbook - a terminal address book
//!
//! This library provides the core of the `addrbook` application: validated
//! contact records, an address book with recycled IDs and paged listing,
//! JSON file persistence, and the command line and interactive front ends.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Contact fields, IDs and records
//! - `book`: The address book collection
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use addrbook::config::{paths::AddrBookPaths, settings::Settings};
//! use addrbook::storage::BookStore;
//!
//! let paths = AddrBookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let book = BookStore::new(paths.book_file()).load()?;
//! ```

pub mod audit;
pub mod book;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::AddrBookError;
