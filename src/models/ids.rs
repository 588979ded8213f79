//! Record identifiers
//!
//! IDs are small positive integers handed out by the address book. They are
//! recycled after deletion, so an ID only identifies a record while that
//! record is live.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Prefix used when an ID is displayed next to a record (e.g. `ID: 3`)
const DISPLAY_PREFIX: &str = "ID:";

/// Identifier of a record inside an address book
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    /// The first ID a fresh book hands out
    pub const FIRST: RecordId = RecordId(1);

    /// Wrap a raw ID value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The ID immediately after this one, `None` past `u32::MAX`
    pub(crate) fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept IDs pasted straight from a rendered record ("ID: 3")
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s).trim();
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(RecordId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("12".parse::<RecordId>().unwrap(), RecordId::new(12));
        assert_eq!(" 12 ".parse::<RecordId>().unwrap(), RecordId::new(12));
        assert_eq!("ID: 3".parse::<RecordId>().unwrap(), RecordId::new(3));
        assert!("abc".parse::<RecordId>().is_err());
        assert!("-1".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
        assert_eq!(RecordId::FIRST.checked_next(), Some(RecordId::new(2)));
        assert_eq!(RecordId::new(u32::MAX).checked_next(), None);
    }

    #[test]
    fn test_id_serialization() {
        let id = RecordId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
        let deserialized: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
