//! CLI command for data export
//!
//! Writes the address book as CSV, JSON or YAML to a file or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};
use crate::export::{export_book_json, export_book_yaml, export_records_csv};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per contact)
    Csv,
    /// JSON format (full book)
    Json,
    /// YAML format (full book, human-readable)
    Yaml,
}

/// Arguments for `addrbook export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(book: &AddressBook, args: ExportArgs) -> AddrBookResult<()> {
    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(create_file(path)?);
            write_export(book, args.format, args.pretty, &mut writer)?;
            writer
                .flush()
                .map_err(|e| AddrBookError::Export(e.to_string()))?;
            println!(
                "Exported {} contact(s) to: {}",
                book.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(book, args.format, args.pretty, &mut writer)?;
        }
    }
    Ok(())
}

fn write_export<W: Write>(
    book: &AddressBook,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> AddrBookResult<()> {
    match format {
        ExportFormat::Csv => export_records_csv(book, writer),
        ExportFormat::Json => export_book_json(book, writer, pretty),
        ExportFormat::Yaml => export_book_yaml(book, writer),
    }
}

fn create_file(path: &Path) -> AddrBookResult<File> {
    File::create(path).map_err(|e| {
        AddrBookError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}
