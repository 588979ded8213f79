//! Storage layer for addrbook
//!
//! Persists the whole address book to a single JSON file with atomic writes.
//! A missing file is an empty book; a file that exists but cannot be read
//! back is reported as corrupt instead of being replaced.

pub mod file_io;

pub use file_io::{read_json_optional, write_json_atomic};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};
use crate::models::{Record, RecordId};

/// Current on-disk format version
pub const BOOK_SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the book
#[derive(Debug, Deserialize)]
struct BookData {
    #[serde(default = "first_id")]
    next_id: RecordId,
    #[serde(default)]
    free_ids: BTreeSet<RecordId>,
    #[serde(default)]
    records: Vec<Record>,
}

fn first_id() -> RecordId {
    RecordId::FIRST
}

/// Borrowed view of a book for serialization
#[derive(Serialize)]
struct BookSnapshot<'a> {
    schema_version: u32,
    next_id: RecordId,
    free_ids: Vec<RecordId>,
    records: Vec<&'a Record>,
}

impl<'a> From<&'a AddressBook> for BookSnapshot<'a> {
    fn from(book: &'a AddressBook) -> Self {
        Self {
            schema_version: BOOK_SCHEMA_VERSION,
            next_id: book.next_id(),
            free_ids: book.freed_ids().collect(),
            records: book.iter().collect(),
        }
    }
}

/// Loads and saves an address book at a fixed path
#[derive(Debug, Clone)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the book, or an empty one if the file doesn't exist yet
    ///
    /// # Errors
    ///
    /// Returns `AddrBookError::CorruptState` when the file exists but cannot
    /// be opened, parsed, or violates book invariants.
    pub fn load(&self) -> AddrBookResult<AddressBook> {
        let data: Option<BookData> = read_json_optional(&self.path)
            .map_err(|e| AddrBookError::corrupt_state(&self.path, e.to_string()))?;

        let Some(data) = data else {
            info!(path = %self.path.display(), "No address book yet, starting empty");
            return Ok(AddressBook::new());
        };

        let book = AddressBook::from_parts(data.records, data.next_id, data.free_ids)
            .map_err(|e| AddrBookError::corrupt_state(&self.path, e.to_string()))?;

        info!(path = %self.path.display(), records = book.len(), "Loaded address book");
        Ok(book)
    }

    /// Write the whole book to disk
    pub fn save(&self, book: &AddressBook) -> AddrBookResult<()> {
        write_json_atomic(&self.path, &BookSnapshot::from(book))?;
        info!(path = %self.path.display(), records = book.len(), "Saved address book");
        Ok(())
    }
}
