//! Paged iteration over an address book

use std::iter::FusedIterator;

use indexmap::map::Values;

use crate::models::{Record, RecordId};

/// Records per batch when no size is given
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Lazy iterator yielding batches of records in book order
///
/// Each record is yielded once. Once exhausted it stays exhausted; start a
/// new walk with [`AddressBook::pages`](super::AddressBook::pages).
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    records: Values<'a, RecordId, Record>,
    size: usize,
}

impl<'a> Pages<'a> {
    pub(super) fn new(records: Values<'a, RecordId, Record>, size: usize) -> Self {
        Self {
            records,
            size: size.max(1),
        }
    }

    /// Next batch, or `None` when every record has been yielded
    pub fn next_batch(&mut self) -> Option<Vec<&'a Record>> {
        self.next()
    }

    /// Records per batch
    pub fn page_size(&self) -> usize {
        self.size
    }
}

impl<'a> Iterator for Pages<'a> {
    type Item = Vec<&'a Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<_> = self.records.by_ref().take(self.size).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

impl FusedIterator for Pages<'_> {}
