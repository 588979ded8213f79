//! JSON Export functionality
//!
//! Exports the whole address book to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};
use crate::models::Record;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full address book export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub record_count: usize,

    /// All records in book order
    pub records: Vec<Record>,
}

impl BookExport {
    pub fn from_book(book: &AddressBook) -> Self {
        let records: Vec<Record> = book.iter().cloned().collect();
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            record_count: records.len(),
            records,
        }
    }
}

/// Export the address book as JSON
pub fn export_book_json<W: Write>(book: &AddressBook, writer: &mut W, pretty: bool) -> AddrBookResult<()> {
    let export = BookExport::from_book(book);

    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    result.map_err(|e| AddrBookError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| AddrBookError::Export(e.to_string()))?;
    Ok(())
}
