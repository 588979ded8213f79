//! The address book
//!
//! Owns every record, keyed by ID in insertion order, and manages ID
//! assignment. IDs freed by deletion are reused, smallest first, before new
//! ones are minted.

mod pages;

pub use pages::{Pages, DEFAULT_PAGE_SIZE};

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{AddrBookError, AddrBookResult};
use crate::models::{Record, RecordId};

/// A collection of contact records keyed by ID
#[derive(Debug, Clone)]
pub struct AddressBook {
    records: IndexMap<RecordId, Record>,
    /// Candidate for the next freshly minted ID
    next_id: RecordId,
    /// IDs released by deletion, never overlapping `records`
    free_ids: BTreeSet<RecordId>,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBook {
    /// Create an empty address book
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
            next_id: RecordId::FIRST,
            free_ids: BTreeSet::new(),
        }
    }

    /// Rebuild a book from persisted parts
    ///
    /// Every record must carry a unique, non-zero ID. Freed IDs that collide
    /// with a live record are dropped.
    pub(crate) fn from_parts(
        records: Vec<Record>,
        next_id: RecordId,
        free_ids: BTreeSet<RecordId>,
    ) -> AddrBookResult<Self> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            let id = record.id().ok_or_else(|| {
                AddrBookError::Storage(format!("record '{}' has no ID", record.name))
            })?;
            if id.get() == 0 {
                return Err(AddrBookError::Storage(format!(
                    "record '{}' has invalid ID 0",
                    record.name
                )));
            }
            if map.insert(id, record).is_some() {
                return Err(AddrBookError::Storage(format!("duplicate record ID {}", id)));
            }
        }

        let mut free_ids = free_ids;
        let before = free_ids.len();
        free_ids.retain(|id| id.get() != 0 && !map.contains_key(id));
        if free_ids.len() != before {
            warn!(
                dropped = before - free_ids.len(),
                "Dropped freed IDs that are still in use"
            );
        }

        Ok(Self {
            records: map,
            next_id: next_id.max(RecordId::FIRST),
            free_ids,
        })
    }

    /// Insert a record, assigning it the smallest available ID
    ///
    /// A freed ID is preferred over minting a new one. The record's ID field
    /// is overwritten with the assigned value.
    ///
    /// # Errors
    ///
    /// Returns `AddrBookError::Storage` when no freed ID is available and
    /// every ID up to `u32::MAX` has been used.
    pub fn add_record(&mut self, mut record: Record) -> AddrBookResult<RecordId> {
        let id = match self.free_ids.pop_first() {
            Some(id) => id,
            None => self.mint_id()?,
        };

        record.assign_id(id);
        debug!(%id, name = %record.name, "Added record");
        self.records.insert(id, record);
        Ok(id)
    }

    /// Take the lowest unused ID at or above the counter
    fn mint_id(&mut self) -> AddrBookResult<RecordId> {
        let mut id = self.next_id;
        while self.records.contains_key(&id) || self.free_ids.contains(&id) {
            id = id
                .checked_next()
                .ok_or_else(|| AddrBookError::Storage("record IDs exhausted".into()))?;
        }
        // At the top of the range the counter stays put; the next mint fails
        self.next_id = id.checked_next().unwrap_or(id);
        Ok(id)
    }

    /// Delete a record; returns false if no record has this ID
    pub fn delete_record_by_id(&mut self, id: RecordId) -> bool {
        self.remove_record(id).is_some()
    }

    /// Delete a record and hand it back
    pub fn remove_record(&mut self, id: RecordId) -> Option<Record> {
        let record = self.records.shift_remove(&id)?;
        self.free_ids.insert(id);
        debug!(%id, "Deleted record");
        Some(record)
    }

    /// Records whose name (case-insensitive), phones or emails contain `term`
    pub fn find(&self, term: &str) -> Vec<&Record> {
        self.records.values().filter(|r| r.matches(term)).collect()
    }

    /// Records whose name contains `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Vec<(RecordId, &Record)> {
        self.records
            .iter()
            .filter(|(_, r)| r.name_contains(name))
            .map(|(id, r)| (*id, r))
            .collect()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.get_mut(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Live IDs in insertion order
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.keys().copied()
    }

    /// IDs waiting to be reused, smallest first
    pub fn freed_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.free_ids.iter().copied()
    }

    /// Counter value the next fresh ID is minted from
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Batches of up to five records
    pub fn pages(&self) -> Pages<'_> {
        self.pages_of(DEFAULT_PAGE_SIZE)
    }

    /// Batches of up to `size` records (a size of 0 is treated as 1)
    pub fn pages_of(&self, size: usize) -> Pages<'_> {
        Pages::new(self.records.values(), size)
    }
}
