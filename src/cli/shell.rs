//! Interactive shell
//!
//! A line-oriented prompt for managing contacts. Input and output are generic
//! so the shell can run against stdin/stdout or in-memory buffers. The book is
//! saved when the user quits or the input ends.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::audit::AuditLogger;
use crate::book::AddressBook;
use crate::config::settings::Settings;
use crate::display::format_record_details;
use crate::error::AddrBookResult;
use crate::models::{Birthday, Email, LeapDayPolicy, Name, Phone, Record, RecordId, ValidationError};
use crate::services::{BirthdayChange, ContactEdit, ContactService};
use crate::storage::BookStore;

const HELP: &str = "\
Commands:
  add, a      Add a new contact
  find, f     Search contacts by name, phone or email
  delete, d   Delete a contact
  edit, e     Edit a contact
  list, l     Page through all contacts
  help, h     Show this help
  quit, q     Save and exit";

/// Outcome of a single prompt
enum Answer<T> {
    Value(T),
    Skip,
    Eof,
}

/// Interactive address book session
pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    book: &'a mut AddressBook,
    store: &'a BookStore,
    audit: Option<&'a AuditLogger>,
    page_size: usize,
    policy: LeapDayPolicy,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        book: &'a mut AddressBook,
        store: &'a BookStore,
        settings: &Settings,
    ) -> Self {
        Self {
            input,
            output,
            book,
            store,
            audit: None,
            page_size: settings.page_size,
            policy: settings.leap_day_policy,
            today: Local::now().date_naive(),
        }
    }

    /// Record changes made in this session to `audit`
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Compute birthday distances relative to `today` instead of the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until `quit` or end of input, then save the book
    ///
    /// Errors from individual commands are reported and the session goes on;
    /// only a failure to save at the end is returned.
    pub fn run(mut self) -> AddrBookResult<()> {
        writeln!(self.output, "Address book ready. Type 'help' for commands.")?;

        loop {
            let command = match self.read_line("> ") {
                Ok(Some(line)) => line.to_lowercase(),
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read command, ending session");
                    break;
                }
            };

            let result = match command.as_str() {
                "" => Ok(()),
                "add" | "a" => self.add(),
                "find" | "f" => self.find(),
                "delete" | "d" => self.delete(),
                "edit" | "e" => self.edit(),
                "list" | "l" => self.list(),
                "help" | "h" => writeln!(self.output, "{}", HELP).map_err(Into::into),
                "quit" | "q" => break,
                other => writeln!(
                    self.output,
                    "Unknown command '{}'. Type 'help' for commands.",
                    other
                )
                .map_err(Into::into),
            };

            if let Err(e) = result {
                warn!(%command, error = %e, "Command failed");
                let _ = writeln!(self.output, "Error: {}", e);
            }
        }

        self.store.save(self.book)?;
        info!(records = self.book.len(), "Session ended");
        writeln!(self.output, "Address book saved.")?;
        Ok(())
    }

    fn add(&mut self) -> AddrBookResult<()> {
        let name = match self.prompt_valid("Name: ", false, |s| Name::new(s))? {
            Answer::Value(name) => name,
            _ => return Ok(()),
        };
        let mut record = Record::new(name);

        match self.prompt_valid("Birthday (YYYY-MM-DD, Enter to skip): ", true, |s| {
            Birthday::new(s)
        })? {
            Answer::Value(birthday) => record.set_birthday(Some(birthday)),
            Answer::Skip => {}
            Answer::Eof => return Ok(()),
        }

        loop {
            match self.prompt_valid("Phone (9 digits, Enter to finish): ", true, |s| Phone::new(s))? {
                Answer::Value(phone) => record.add_phone(phone),
                Answer::Skip => break,
                Answer::Eof => return Ok(()),
            }
        }

        loop {
            match self.prompt_valid("Email (Enter to finish): ", true, |s| Email::new(s))? {
                Answer::Value(email) => record.add_email(email),
                Answer::Skip => break,
                Answer::Eof => return Ok(()),
            }
        }

        let id = ContactService::new(self.book, self.audit).add(record)?;
        writeln!(self.output, "Added contact with ID {}.", id)?;
        Ok(())
    }

    fn find(&mut self) -> AddrBookResult<()> {
        let term = match self.read_line("Search term: ")? {
            Some(term) => term,
            None => return Ok(()),
        };

        let matches = self.book.find(&term);
        if matches.is_empty() {
            writeln!(self.output, "No matching contacts.")?;
        }
        for record in matches {
            writeln!(self.output, "{}", record.render(self.today, self.policy))?;
        }
        Ok(())
    }

    fn delete(&mut self) -> AddrBookResult<()> {
        let name = match self.read_line("Name of the contact to delete: ")? {
            Some(name) => name,
            None => return Ok(()),
        };

        let matches = self.book.find_by_name(&name);
        if matches.is_empty() {
            writeln!(self.output, "No matching contacts.")?;
            return Ok(());
        }
        for (_, record) in matches {
            writeln!(self.output, "{}", record.render(self.today, self.policy))?;
        }

        let id = match self.read_id("ID to delete: ")? {
            Some(id) => id,
            None => return Ok(()),
        };

        match ContactService::new(self.book, self.audit).delete(id) {
            Ok(record) => {
                debug!(%id, "Deleted from shell");
                writeln!(self.output, "Deleted {} (ID {}).", record.name, id)?;
            }
            Err(e) if e.is_not_found() => {
                writeln!(self.output, "Contact with ID {} not found.", id)?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn edit(&mut self) -> AddrBookResult<()> {
        let id = match self.read_id("ID to edit: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        let record = match self.book.get(id) {
            Some(record) => record.clone(),
            None => {
                writeln!(self.output, "Contact with ID {} not found.", id)?;
                return Ok(());
            }
        };
        write!(
            self.output,
            "{}",
            format_record_details(&record, self.today, self.policy)
        )?;

        let mut edit = ContactEdit::default();

        match self.prompt_valid("New name (Enter to keep): ", true, |s| Name::new(s))? {
            Answer::Value(name) => edit.name = Some(name.to_string()),
            Answer::Skip => {}
            Answer::Eof => return Ok(()),
        }

        match self.prompt_valid(
            "New birthday (YYYY-MM-DD, '-' to clear, Enter to keep): ",
            true,
            |s| {
                if s == "-" {
                    Ok(BirthdayChange::Clear)
                } else {
                    Birthday::new(s).map(|b| BirthdayChange::Set(b.to_string()))
                }
            },
        )? {
            Answer::Value(change) => edit.birthday = Some(change),
            Answer::Skip => {}
            Answer::Eof => return Ok(()),
        }

        if !record.phones.is_empty() {
            match self.read_index("Phone to replace", record.phones.len())? {
                Answer::Value(index) => {
                    match self.prompt_valid("New phone: ", false, |s| Phone::new(s))? {
                        Answer::Value(phone) => edit
                            .replace_phones
                            .push((record.phones[index].to_string(), phone.to_string())),
                        _ => return Ok(()),
                    }
                }
                Answer::Skip => {}
                Answer::Eof => return Ok(()),
            }
        }

        if !record.emails.is_empty() {
            match self.read_index("Email to replace", record.emails.len())? {
                Answer::Value(index) => {
                    match self.prompt_valid("New email: ", false, |s| Email::new(s))? {
                        Answer::Value(email) => edit
                            .replace_emails
                            .push((record.emails[index].to_string(), email.to_string())),
                        _ => return Ok(()),
                    }
                }
                Answer::Skip => {}
                Answer::Eof => return Ok(()),
            }
        }

        match self.prompt_valid("Add phone (Enter to skip): ", true, |s| Phone::new(s))? {
            Answer::Value(phone) => edit.add_phones.push(phone.to_string()),
            Answer::Skip => {}
            Answer::Eof => return Ok(()),
        }

        match self.prompt_valid("Add email (Enter to skip): ", true, |s| Email::new(s))? {
            Answer::Value(email) => edit.add_emails.push(email.to_string()),
            Answer::Skip => {}
            Answer::Eof => return Ok(()),
        }

        if edit.is_empty() {
            writeln!(self.output, "No changes made.")?;
            return Ok(());
        }

        let today = self.today;
        let policy = self.policy;
        let mut service = ContactService::new(self.book, self.audit);
        let updated = service.update(id, &edit)?;
        writeln!(self.output, "Updated: {}", updated.render(today, policy))?;
        Ok(())
    }

    fn list(&mut self) -> AddrBookResult<()> {
        if self.book.is_empty() {
            writeln!(self.output, "The address book is empty.")?;
            return Ok(());
        }

        let mut pages = self.book.pages_of(self.page_size).peekable();
        while let Some(batch) = pages.next() {
            for record in batch {
                writeln!(self.output, "{}", record.render(self.today, self.policy))?;
            }
            if pages.peek().is_none() {
                break;
            }

            write!(self.output, "Press Enter to continue or 'q' to stop: ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
                return Ok(());
            }
        }

        writeln!(self.output, "End of list.")?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> AddrBookResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until `parse` accepts the input
    ///
    /// A blank line is a skip when `optional`, otherwise it is passed to
    /// `parse` like any other input.
    fn prompt_valid<T>(
        &mut self,
        prompt: &str,
        optional: bool,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> AddrBookResult<Answer<T>> {
        loop {
            let line = match self.read_line(prompt)? {
                Some(line) => line,
                None => return Ok(Answer::Eof),
            };
            if optional && line.is_empty() {
                return Ok(Answer::Skip);
            }
            match parse(&line) {
                Ok(value) => return Ok(Answer::Value(value)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Read a record ID, reporting input that is not one
    fn read_id(&mut self, prompt: &str) -> AddrBookResult<Option<RecordId>> {
        let line = match self.read_line(prompt)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match line.parse::<RecordId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid ID '{}'.", line)?;
                Ok(None)
            }
        }
    }

    /// Read a 1-based index into a list of `len` items, returned 0-based
    fn read_index(&mut self, what: &str, len: usize) -> AddrBookResult<Answer<usize>> {
        let prompt = format!("{} (1-{}, Enter to skip): ", what, len);
        loop {
            let line = match self.read_line(&prompt)? {
                Some(line) => line,
                None => return Ok(Answer::Eof),
            };
            if line.is_empty() {
                return Ok(Answer::Skip);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=len).contains(&n) => return Ok(Answer::Value(n - 1)),
                _ => writeln!(self.output, "Invalid index '{}'.", line)?,
            }
        }
    }
}
