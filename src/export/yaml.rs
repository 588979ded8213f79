//! YAML Export functionality
//!
//! Exports the address book to YAML for a human-readable backup.

use std::io::Write;

use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};
use crate::export::json::BookExport;

/// Export the address book as YAML
pub fn export_book_yaml<W: Write>(book: &AddressBook, writer: &mut W) -> AddrBookResult<()> {
    let export = BookExport::from_book(book);

    writeln!(writer, "# addrbook export")
        .map_err(|e| AddrBookError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| AddrBookError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AddrBookError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| AddrBookError::Export(e.to_string()))?;

    Ok(())
}
