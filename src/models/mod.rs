//! Core data models for addrbook
//!
//! Validated contact fields, record identifiers and the contact record
//! itself.

pub mod fields;
pub mod ids;
pub mod record;

pub use fields::{
    validate_birthday, validate_email, validate_phone, Birthday, Email, Name, Phone,
    ValidationError,
};
pub use ids::RecordId;
pub use record::{next_birthday, LeapDayPolicy, Record};
