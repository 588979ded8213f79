//! Service layer for addrbook
//!
//! The service layer provides business logic on top of the address book,
//! handling validation of raw input and the audit trail.

pub mod contact;

pub use contact::{BirthdayChange, ContactEdit, ContactService, CreateContactInput};
