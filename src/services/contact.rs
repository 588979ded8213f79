//! Contact service
//!
//! Business logic on top of the address book: validates raw input into
//! fields, applies edits all-or-nothing, and writes an audit entry for every
//! change.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::book::AddressBook;
use crate::error::{AddrBookError, AddrBookResult};
use crate::models::{Birthday, Email, LeapDayPolicy, Name, Phone, Record, RecordId};

/// Raw input for a new contact
#[derive(Debug, Clone, Default)]
pub struct CreateContactInput {
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub birthday: Option<String>,
}

/// Requested change to a contact's birthday
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthdayChange {
    Set(String),
    Clear,
}

/// A set of edits applied to one contact in a single step
#[derive(Debug, Clone, Default)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub birthday: Option<BirthdayChange>,
    pub add_phones: Vec<String>,
    pub remove_phones: Vec<String>,
    /// (old, new) pairs
    pub replace_phones: Vec<(String, String)>,
    pub add_emails: Vec<String>,
    pub remove_emails: Vec<String>,
    /// (old, new) pairs
    pub replace_emails: Vec<(String, String)>,
}

impl ContactEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.birthday.is_none()
            && self.add_phones.is_empty()
            && self.remove_phones.is_empty()
            && self.replace_phones.is_empty()
            && self.add_emails.is_empty()
            && self.remove_emails.is_empty()
            && self.replace_emails.is_empty()
    }

    /// Apply every edit to `record`, returning a description of the changes
    fn apply(&self, record: &mut Record) -> AddrBookResult<Vec<String>> {
        let mut changes = Vec::new();

        if let Some(name) = &self.name {
            let name = Name::new(name.as_str())?;
            changes.push(format!("name: {} -> {}", record.name, name));
            record.edit_name(name);
        }

        match &self.birthday {
            Some(BirthdayChange::Set(value)) => {
                let birthday = Birthday::new(value.as_str())?;
                changes.push(format!("birthday: {}", birthday));
                record.set_birthday(Some(birthday));
            }
            Some(BirthdayChange::Clear) => {
                changes.push("birthday cleared".to_string());
                record.set_birthday(None);
            }
            None => {}
        }

        for (old, new) in &self.replace_phones {
            let old = Phone::new(old.as_str())?;
            let new = Phone::new(new.as_str())?;
            changes.push(format!("phone {} -> {}", old, new));
            record.edit_phone(&old, new)?;
        }
        for value in &self.remove_phones {
            let phone = Phone::new(value.as_str())?;
            record.remove_phone(&phone)?;
            changes.push(format!("phone -{}", phone));
        }
        for value in &self.add_phones {
            let phone = Phone::new(value.as_str())?;
            changes.push(format!("phone +{}", phone));
            record.add_phone(phone);
        }

        for (old, new) in &self.replace_emails {
            let old = Email::new(old.as_str())?;
            let new = Email::new(new.as_str())?;
            changes.push(format!("email {} -> {}", old, new));
            record.edit_email(&old, new)?;
        }
        for value in &self.remove_emails {
            let email = Email::new(value.as_str())?;
            record.remove_email(&email)?;
            changes.push(format!("email -{}", email));
        }
        for value in &self.add_emails {
            let email = Email::new(value.as_str())?;
            changes.push(format!("email +{}", email));
            record.add_email(email);
        }

        Ok(changes)
    }
}

/// Service for contact management
pub struct ContactService<'a> {
    book: &'a mut AddressBook,
    audit: Option<&'a AuditLogger>,
}

impl<'a> ContactService<'a> {
    /// Create a service; pass `None` to skip audit logging
    pub fn new(book: &'a mut AddressBook, audit: Option<&'a AuditLogger>) -> Self {
        Self { book, audit }
    }

    /// Validate the input and add a new contact
    ///
    /// Nothing is added if any field is invalid.
    pub fn create(&mut self, input: CreateContactInput) -> AddrBookResult<RecordId> {
        let record = build_record(input)?;
        self.add(record)
    }

    /// Add an already-built record
    pub fn add(&mut self, record: Record) -> AddrBookResult<RecordId> {
        let id = self.book.add_record(record)?;
        if let Some(record) = self.book.get(id) {
            self.record_audit(|| AuditEntry::create(id, record));
        }
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> AddrBookResult<&Record> {
        self.book
            .get(id)
            .ok_or_else(|| AddrBookError::record_not_found(id.to_string()))
    }

    /// Contacts matching `term` by name, phone or email
    pub fn search(&self, term: &str) -> Vec<&Record> {
        self.book.find(term)
    }

    /// Delete a contact, returning the removed record
    pub fn delete(&mut self, id: RecordId) -> AddrBookResult<Record> {
        let record = self
            .book
            .remove_record(id)
            .ok_or_else(|| AddrBookError::record_not_found(id.to_string()))?;

        self.record_audit(|| AuditEntry::delete(id, &record));
        Ok(record)
    }

    /// Apply a set of edits to a contact
    ///
    /// Edits are applied to a copy first; if any of them fails the stored
    /// record is left untouched.
    pub fn update(&mut self, id: RecordId, edit: &ContactEdit) -> AddrBookResult<&Record> {
        if edit.is_empty() {
            return Err(AddrBookError::Validation("Nothing to change".into()));
        }

        let record = self
            .book
            .get_mut(id)
            .ok_or_else(|| AddrBookError::record_not_found(id.to_string()))?;

        let before = record.clone();
        let mut updated = record.clone();
        let changes = edit.apply(&mut updated)?;
        *record = updated;

        let summary = changes.join("; ");
        debug!(%id, %summary, "Updated record");

        if let Some(audit) = self.audit {
            log_audit(audit, &AuditEntry::update(id, &before, record, Some(summary)));
        }

        Ok(&*record)
    }

    /// Contacts whose next birthday is at most `within_days` away, soonest first
    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        within_days: i64,
        policy: LeapDayPolicy,
    ) -> Vec<(i64, &Record)> {
        let mut upcoming: Vec<_> = self
            .book
            .iter()
            .filter_map(|r| r.days_to_next_birthday(today, policy).map(|days| (days, r)))
            .filter(|(days, _)| *days <= within_days)
            .collect();
        upcoming.sort_by_key(|(days, r)| (*days, r.id()));
        upcoming
    }

    pub fn book(&self) -> &AddressBook {
        self.book
    }

    fn record_audit(&self, entry: impl FnOnce() -> AuditEntry) {
        if let Some(audit) = self.audit {
            log_audit(audit, &entry());
        }
    }
}

/// Append to the audit log; a failure is logged and does not undo the change
fn log_audit(audit: &AuditLogger, entry: &AuditEntry) {
    if let Err(e) = audit.log(entry) {
        warn!(
            error = %e,
            path = %audit.path().display(),
            operation = %entry.operation,
            "Failed to write audit entry"
        );
    }
}

/// Validate raw input into a detached record
pub fn build_record(input: CreateContactInput) -> AddrBookResult<Record> {
    let name = Name::new(input.name)?;
    let mut record = Record::new(name);

    if let Some(birthday) = input.birthday {
        record.set_birthday(Some(Birthday::new(birthday)?));
    }
    for phone in input.phones {
        record.add_phone(Phone::new(phone)?);
    }
    for email in input.emails {
        record.add_email(Email::new(email)?);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn input(name: &str) -> CreateContactInput {
        CreateContactInput {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_contact() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);

        let id = service
            .create(CreateContactInput {
                name: "John Smith".into(),
                phones: vec!["555123456".into()],
                emails: vec!["john@smith.net".into()],
                birthday: Some("1980-06-01".into()),
            })
            .unwrap();

        let record = service.get(id).unwrap();
        assert_eq!(record.name.as_str(), "John Smith");
        assert_eq!(record.phones.len(), 1);
        assert_eq!(record.emails.len(), 1);
        assert!(record.birthday.is_some());
    }

    #[test]
    fn test_create_invalid_adds_nothing() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);

        let err = service
            .create(CreateContactInput {
                name: "John".into(),
                phones: vec!["555123456".into(), "12".into()],
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.book().is_empty());

        assert!(service.create(input("   ")).unwrap_err().is_validation());
        assert!(service.book().is_empty());
    }

    #[test]
    fn test_delete_contact() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        let id = service.create(input("Ann")).unwrap();

        let removed = service.delete(id).unwrap();
        assert_eq!(removed.name.as_str(), "Ann");
        assert!(service.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_contact() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        let id = service
            .create(CreateContactInput {
                name: "Ann".into(),
                phones: vec!["111111111".into()],
                emails: vec!["ann@old.com".into()],
                birthday: None,
            })
            .unwrap();

        let edit = ContactEdit {
            name: Some("Ann Smith".into()),
            birthday: Some(BirthdayChange::Set("1991-03-03".into())),
            replace_phones: vec![("111111111".into(), "222222222".into())],
            add_emails: vec!["ann@new.com".into()],
            remove_emails: vec!["ann@old.com".into()],
            ..Default::default()
        };
        let record = service.update(id, &edit).unwrap();

        assert_eq!(record.name.as_str(), "Ann Smith");
        assert_eq!(record.birthday.as_ref().unwrap().as_str(), "1991-03-03");
        assert_eq!(record.phones, vec![Phone::new("222222222").unwrap()]);
        assert_eq!(record.emails, vec![Email::new("ann@new.com").unwrap()]);
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        let id = service
            .create(CreateContactInput {
                name: "Ann".into(),
                phones: vec!["111111111".into()],
                ..Default::default()
            })
            .unwrap();

        let edit = ContactEdit {
            name: Some("Renamed".into()),
            replace_phones: vec![("999999999".into(), "222222222".into())],
            ..Default::default()
        };
        let err = service.update(id, &edit).unwrap_err();
        assert!(err.is_not_found());

        let record = service.get(id).unwrap();
        assert_eq!(record.name.as_str(), "Ann");
        assert_eq!(record.phones, vec![Phone::new("111111111").unwrap()]);
    }

    #[test]
    fn test_update_unknown_or_empty() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        let edit = ContactEdit {
            name: Some("X".into()),
            ..Default::default()
        };
        assert!(service
            .update(RecordId::new(5), &edit)
            .unwrap_err()
            .is_not_found());

        let id = service.create(input("Ann")).unwrap();
        assert!(service
            .update(id, &ContactEdit::default())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_clear_birthday() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        let id = service
            .create(CreateContactInput {
                name: "Ann".into(),
                birthday: Some("1990-01-01".into()),
                ..Default::default()
            })
            .unwrap();

        let edit = ContactEdit {
            birthday: Some(BirthdayChange::Clear),
            ..Default::default()
        };
        assert!(service.update(id, &edit).unwrap().birthday.is_none());
    }

    #[test]
    fn test_upcoming_birthdays() {
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, None);
        for (name, birthday) in [
            ("Later", Some("1990-05-20")),
            ("Soon", Some("1985-05-03")),
            ("Today", Some("2000-05-01")),
            ("Far", Some("1970-11-11")),
            ("None", None),
        ] {
            service
                .create(CreateContactInput {
                    name: name.into(),
                    birthday: birthday.map(String::from),
                    ..Default::default()
                })
                .unwrap();
        }

        let upcoming = service.upcoming_birthdays(date(2024, 5, 1), 30, LeapDayPolicy::default());
        let names: Vec<_> = upcoming
            .iter()
            .map(|(days, r)| (*days, r.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "Today"), (2, "Soon"), (19, "Later")]);
    }

    #[test]
    fn test_audit_entries_written() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, Some(&logger));

        let id = service.create(input("Ann")).unwrap();
        let edit = ContactEdit {
            add_phones: vec!["123456789".into()],
            ..Default::default()
        };
        service.update(id, &edit).unwrap();
        service.delete(id).unwrap();

        let entries = logger.read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(entries[1].summary.as_deref(), Some("phone +123456789"));
    }

    #[test]
    fn test_audit_failure_keeps_changes() {
        let temp_dir = TempDir::new().unwrap();
        // a directory cannot be opened for appending
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());
        let mut book = AddressBook::new();
        let mut service = ContactService::new(&mut book, Some(&logger));

        let id = service.create(input("Ann")).unwrap();
        assert_eq!(service.book().len(), 1);

        let edit = ContactEdit {
            name: Some("Ann Smith".into()),
            ..Default::default()
        };
        assert_eq!(service.update(id, &edit).unwrap().name.as_str(), "Ann Smith");

        service.delete(id).unwrap();
        assert!(service.book().is_empty());
    }
}
