//! Audit logging for addrbook
//!
//! Records every create, update and delete of a contact with before/after
//! snapshots in an append-only, line-delimited JSON log.
//!
//! # Example
//!
//! ```rust,ignore
//! use addrbook::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let id = book.add_record(record)?;
//! logger.log(&AuditEntry::create(id, book.get(id).unwrap()))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
