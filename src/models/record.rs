//! Contact record model
//!
//! A record holds one contact's name, phones, emails and optional birthday.
//! Its ID is assigned by the address book on insertion and cannot be set
//! from outside the crate.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::fields::{Birthday, Email, Name, Phone};
use super::ids::RecordId;
use crate::error::{AddrBookError, AddrBookResult};

/// How a February 29 birthday is observed in years without that day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeapDayPolicy {
    /// Celebrate on March 1 (default)
    #[default]
    MarchFirst,
    /// Celebrate on February 28
    FebruaryTwentyEighth,
}

impl LeapDayPolicy {
    fn substitute(self, year: i32) -> Option<NaiveDate> {
        match self {
            Self::MarchFirst => NaiveDate::from_ymd_opt(year, 3, 1),
            Self::FebruaryTwentyEighth => NaiveDate::from_ymd_opt(year, 2, 28),
        }
    }
}

/// The date a birthday falls on in `year`
fn occurrence_in(birth: NaiveDate, year: i32, policy: LeapDayPolicy) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day()).or_else(|| {
        if birth.month() == 2 && birth.day() == 29 {
            policy.substitute(year)
        } else {
            None
        }
    })
}

/// Next occurrence of `birth` on or after `today`
pub fn next_birthday(birth: NaiveDate, today: NaiveDate, policy: LeapDayPolicy) -> Option<NaiveDate> {
    let this_year = occurrence_in(birth, today.year(), policy)?;
    if today > this_year {
        occurrence_in(birth, today.year() + 1, policy)
    } else {
        Some(this_year)
    }
}

/// A single address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Assigned by the address book; `None` while detached
    #[serde(default)]
    id: Option<RecordId>,

    /// Full name
    pub name: Name,

    /// Phone numbers in the order they were added
    #[serde(default)]
    pub phones: Vec<Phone>,

    /// Email addresses in the order they were added
    #[serde(default)]
    pub emails: Vec<Email>,

    /// Optional date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Birthday>,
}

impl Record {
    /// Create a detached record with just a name
    pub fn new(name: Name) -> Self {
        Self {
            id: None,
            name,
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
        }
    }

    /// Create a detached record with a birthday
    pub fn with_birthday(name: Name, birthday: Birthday) -> Self {
        let mut record = Self::new(name);
        record.birthday = Some(birthday);
        record
    }

    /// The ID assigned by the address book, if inserted
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Remove the first phone equal to `phone`
    pub fn remove_phone(&mut self, phone: &Phone) -> AddrBookResult<()> {
        let pos = self
            .phones
            .iter()
            .position(|p| p == phone)
            .ok_or_else(|| AddrBookError::phone_not_found(phone.as_str()))?;
        self.phones.remove(pos);
        Ok(())
    }

    /// Replace `old` with `new`; nothing is added if `old` is absent
    pub fn edit_phone(&mut self, old: &Phone, new: Phone) -> AddrBookResult<()> {
        self.remove_phone(old)?;
        self.add_phone(new);
        Ok(())
    }

    pub fn add_email(&mut self, email: Email) {
        self.emails.push(email);
    }

    /// Remove the first email equal to `email`
    pub fn remove_email(&mut self, email: &Email) -> AddrBookResult<()> {
        let pos = self
            .emails
            .iter()
            .position(|e| e == email)
            .ok_or_else(|| AddrBookError::email_not_found(email.as_str()))?;
        self.emails.remove(pos);
        Ok(())
    }

    /// Replace `old` with `new`; nothing is added if `old` is absent
    pub fn edit_email(&mut self, old: &Email, new: Email) -> AddrBookResult<()> {
        self.remove_email(old)?;
        self.add_email(new);
        Ok(())
    }

    pub fn edit_name(&mut self, name: Name) {
        self.name = name;
    }

    pub fn set_birthday(&mut self, birthday: Option<Birthday>) {
        self.birthday = birthday;
    }

    /// Days from `today` until the next birthday
    ///
    /// Returns `None` when no birthday is set. The birthday itself counts as
    /// zero days away.
    pub fn days_to_next_birthday(&self, today: NaiveDate, policy: LeapDayPolicy) -> Option<i64> {
        let birthday = self.birthday.as_ref()?;
        let next = next_birthday(birthday.date(), today, policy)?;
        Some((next - today).num_days())
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, term: &str) -> bool {
        self.name
            .as_str()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }

    /// Name (case-insensitive), phone or email (case-sensitive) contains `term`
    pub fn matches(&self, term: &str) -> bool {
        self.name_contains(term)
            || self.phones.iter().any(|p| p.as_str().contains(term))
            || self.emails.iter().any(|e| e.as_str().contains(term))
    }

    /// Render the record as a single line relative to `today`
    pub fn render(&self, today: NaiveDate, policy: LeapDayPolicy) -> String {
        let id = self
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let phones = join(&self.phones);
        let emails = join(&self.emails);

        let mut line = format!(
            "ID: {}, Name: {}, Phones: {}, Emails: {}",
            id, self.name, phones, emails
        );
        if let Some(birthday) = &self.birthday {
            line.push_str(&format!(", Birthday: {}", birthday));
            if let Some(days) = self.days_to_next_birthday(today, policy) {
                line.push_str(&format!(", Days to birthday: {}", days));
            }
        }
        line
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let today = Local::now().date_naive();
        write!(f, "{}", self.render(today, LeapDayPolicy::default()))
    }
}
