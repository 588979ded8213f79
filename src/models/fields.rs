//! Validated contact field values
//!
//! Every field is a newtype over the verbatim input string. Construction runs
//! the matching validator, so a `Phone`, `Email` or `Birthday` that exists is
//! always well-formed. Deserialization goes through the same constructors.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Date format accepted for birthdays
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("Failed to compile email regex")
});

static BIRTHDAY_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Failed to compile birthday regex")
});

/// Errors raised when a field value fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid phone number '{0}': expected exactly 9 digits")]
    InvalidPhone(String),

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Invalid birthday '{0}': expected a date in YYYY-MM-DD format")]
    InvalidBirthday(String),
}

/// True iff `value` is exactly nine ASCII digits
pub fn validate_phone(value: &str) -> bool {
    value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `value` looks like `local@domain.tld`
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// True iff `value` is a real calendar date in `YYYY-MM-DD` form
pub fn validate_birthday(value: &str) -> bool {
    parse_birthday(value).is_some()
}

fn parse_birthday(value: &str) -> Option<NaiveDate> {
    // chrono alone tolerates a sign and surrounding whitespace
    if !BIRTHDAY_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).ok()
}

/// Implements string-backed serde and Display for a field newtype
macro_rules! string_field {
    ($name:ident) => {
        impl $name {
            /// Get the value as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $name::new(s).map_err(serde::de::Error::custom)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// A contact's full name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Create a name; blank input is rejected
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(value))
    }
}

string_field!(Name);

/// A nine-digit phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Create a phone number, validating the format
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` unless the value is exactly
    /// nine digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !validate_phone(&value) {
            return Err(ValidationError::InvalidPhone(value));
        }
        Ok(Self(value))
    }
}

string_field!(Phone);

/// An email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email address, validating the format
    ///
    /// The value is stored as given; no case folding or trimming happens.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !validate_email(&value) {
            return Err(ValidationError::InvalidEmail(value));
        }
        Ok(Self(value))
    }
}

string_field!(Email);

/// A date of birth, kept as the text the user entered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Birthday(String, NaiveDate);

impl Birthday {
    /// Create a birthday from a `YYYY-MM-DD` string
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        match parse_birthday(&value) {
            Some(date) => Ok(Self(value, date)),
            None => Err(ValidationError::InvalidBirthday(value)),
        }
    }

    /// The parsed calendar date
    pub fn date(&self) -> NaiveDate {
        self.1
    }
}

string_field!(Birthday);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("123456789"));
        assert!(validate_phone("000000000"));

        assert!(!validate_phone("12345678"));
        assert!(!validate_phone("1234567890"));
        assert!(!validate_phone("12345678a"));
        assert!(!validate_phone("123 45678"));
        assert!(!validate_phone("+12345678"));
        assert!(!validate_phone(""));
        // Non-ASCII digits are not accepted
        assert!(!validate_phone("١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com"));
        assert!(validate_email("first.last+tag@mail-server.co.uk"));
        assert!(validate_email("a_b-c@x.io"));

        assert!(!validate_email("john.example.com"));
        assert!(!validate_email("john@example"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("john@@example.com"));
        assert!(!validate_email("john doe@example.com"));
        assert!(!validate_email("john@sub.domain@example.com"));
    }

    #[test]
    fn test_validate_birthday() {
        assert!(validate_birthday("1990-01-15"));
        assert!(validate_birthday("2000-02-29"));

        assert!(!validate_birthday("1999-02-29"));
        assert!(!validate_birthday("1990-13-01"));
        assert!(!validate_birthday("1990-04-31"));
        assert!(!validate_birthday("15-01-1990"));
        assert!(!validate_birthday("yesterday"));
        assert!(!validate_birthday(""));
        assert!(!validate_birthday("+1990-01-15"));
        assert!(!validate_birthday(" 1990-01-15"));
        assert!(!validate_birthday("1990-01-15 "));
        assert!(!validate_birthday("1990-1-15"));
    }

    #[test]
    fn test_phone_construction() {
        let phone = Phone::new("987654321").unwrap();
        assert_eq!(phone.as_str(), "987654321");

        let err = Phone::new("98765").unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhone("98765".into()));
        assert!(err.to_string().contains("9 digits"));
    }

    #[test]
    fn test_email_stored_verbatim() {
        for raw in ["John.Smith@Example.COM", "x+y@a-b.c.d", "u_1@host.org"] {
            let email = Email::new(raw).unwrap();
            assert_eq!(email.as_str(), raw);
            assert_eq!(email.to_string(), raw);
        }
    }

    #[test]
    fn test_name_rejects_blank() {
        assert_eq!(Name::new("   ").unwrap_err(), ValidationError::EmptyName);
        assert_eq!(Name::new("Jane Doe").unwrap().as_str(), "Jane Doe");
    }

    #[test]
    fn test_birthday_date() {
        let birthday = Birthday::new("1985-07-04").unwrap();
        assert_eq!(birthday.as_str(), "1985-07-04");
        assert_eq!(birthday.date().year(), 1985);
        assert_eq!(birthday.date().month(), 7);
        assert_eq!(birthday.date().day(), 4);
    }

    #[test]
    fn test_deserialize_validates() {
        let phone: Phone = serde_json::from_str("\"111222333\"").unwrap();
        assert_eq!(phone.as_str(), "111222333");

        assert!(serde_json::from_str::<Phone>("\"12\"").is_err());
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
        assert!(serde_json::from_str::<Birthday>("\"2021-02-30\"").is_err());
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let email = Email::new("jane@example.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"jane@example.com\"");
    }
}
