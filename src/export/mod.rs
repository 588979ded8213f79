//! Export module for addrbook
//!
//! Provides address book export in multiple formats:
//! - CSV: one row per contact (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_records_csv;
pub use self::json::{export_book_json, BookExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_book_yaml;
