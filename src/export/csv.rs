//! CSV Export functionality
//!
//! One row per record; multiple phones or emails are joined with `;`.

use std::io::Write;

use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};

const HEADER: [&str; 5] = ["ID", "Name", "Phones", "Emails", "Birthday"];

/// Export all records to CSV
pub fn export_records_csv<W: Write>(book: &AddressBook, writer: W) -> AddrBookResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| AddrBookError::Export(e.to_string()))?;

    for record in book.iter() {
        let id = record.id().map(|id| id.to_string()).unwrap_or_default();
        let phones: Vec<&str> = record.phones.iter().map(|p| p.as_str()).collect();
        let emails: Vec<&str> = record.emails.iter().map(|e| e.as_str()).collect();
        let birthday = record.birthday.as_ref().map(|b| b.as_str()).unwrap_or("");

        csv_writer
            .write_record([
                id.as_str(),
                record.name.as_str(),
                &phones.join(";"),
                &emails.join(";"),
                birthday,
            ])
            .map_err(|e| AddrBookError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| AddrBookError::Export(e.to_string()))?;
    Ok(())
}
