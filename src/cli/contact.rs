//! Contact CLI commands
//!
//! One-shot commands for contact management. Each command loads the book,
//! applies its change through the contact service and saves the book again
//! when something changed.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::book::AddressBook;
use crate::config::settings::Settings;
use crate::display::{format_record_details, format_record_list};
use crate::error::{AddrBookError, AddrBookResult};
use crate::models::RecordId;
use crate::services::{BirthdayChange, ContactEdit, ContactService, CreateContactInput};
use crate::storage::BookStore;

/// Contact subcommands
#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a new contact
    #[command(alias = "a")]
    Add {
        /// Full name
        name: String,
        /// Phone number, exactly 9 digits (repeatable)
        #[arg(short, long = "phone")]
        phones: Vec<String>,
        /// Email address (repeatable)
        #[arg(short, long = "email")]
        emails: Vec<String>,
        /// Birthday (YYYY-MM-DD)
        #[arg(short, long)]
        birthday: Option<String>,
    },
    /// Search contacts by name, phone or email
    #[command(alias = "f")]
    Find {
        /// Text to search for
        term: String,
    },
    /// Show contact details
    Show {
        /// Contact ID
        id: RecordId,
    },
    /// List contacts
    #[command(alias = "ls")]
    List {
        /// Show only this page (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact ID
        id: RecordId,
    },
    /// Edit a contact
    Edit {
        /// Contact ID
        id: RecordId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New birthday (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_birthday")]
        birthday: Option<String>,
        /// Remove the birthday
        #[arg(long)]
        clear_birthday: bool,
        /// Add a phone number (repeatable)
        #[arg(long)]
        add_phone: Vec<String>,
        /// Remove a phone number (repeatable)
        #[arg(long)]
        remove_phone: Vec<String>,
        /// Replace a phone number
        #[arg(long, num_args = 2, value_names = ["OLD", "NEW"])]
        replace_phone: Vec<String>,
        /// Add an email address (repeatable)
        #[arg(long)]
        add_email: Vec<String>,
        /// Remove an email address (repeatable)
        #[arg(long)]
        remove_email: Vec<String>,
        /// Replace an email address
        #[arg(long, num_args = 2, value_names = ["OLD", "NEW"])]
        replace_email: Vec<String>,
    },
    /// Show upcoming birthdays
    Birthdays {
        /// Look this many days ahead
        #[arg(short, long, default_value = "7")]
        within: i64,
    },
    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a contact command
pub fn handle_contact_command(
    store: &BookStore,
    audit: Option<&AuditLogger>,
    settings: &Settings,
    cmd: ContactCommands,
) -> AddrBookResult<()> {
    let today = Local::now().date_naive();
    let mut book = store.load()?;

    if run_contact_command(&mut book, audit, settings, today, cmd)? {
        store.save(&book)?;
    }
    Ok(())
}

/// Run a command against a loaded book, returning whether it changed
fn run_contact_command(
    book: &mut AddressBook,
    audit: Option<&AuditLogger>,
    settings: &Settings,
    today: NaiveDate,
    cmd: ContactCommands,
) -> AddrBookResult<bool> {
    let policy = settings.leap_day_policy;
    let mut service = ContactService::new(book, audit);

    match cmd {
        ContactCommands::Add {
            name,
            phones,
            emails,
            birthday,
        } => {
            let id = service.create(CreateContactInput {
                name,
                phones,
                emails,
                birthday,
            })?;
            let record = service.get(id)?;
            println!("Added contact: {}", record.render(today, policy));
            Ok(true)
        }

        ContactCommands::Find { term } => {
            let matches = service.search(&term);
            if matches.is_empty() {
                println!("No matching contacts.");
            }
            for record in matches {
                println!("{}", record.render(today, policy));
            }
            Ok(false)
        }

        ContactCommands::Show { id } => {
            let record = service.get(id)?;
            print!("{}", format_record_details(record, today, policy));
            Ok(false)
        }

        ContactCommands::List { page } => {
            let book = service.book();
            match page {
                Some(page) => {
                    let records = page
                        .checked_sub(1)
                        .and_then(|n| book.pages_of(settings.page_size).nth(n))
                        .ok_or_else(|| {
                            AddrBookError::Validation(format!("Page {} does not exist", page))
                        })?;
                    println!("{}", format_record_list(&records));
                }
                None => {
                    let records: Vec<_> = book.iter().collect();
                    println!("{}", format_record_list(&records));
                }
            }
            Ok(false)
        }

        ContactCommands::Delete { id } => {
            let record = service.delete(id)?;
            println!("Deleted contact: {} (ID {})", record.name, id);
            Ok(true)
        }

        ContactCommands::Edit {
            id,
            name,
            birthday,
            clear_birthday,
            add_phone,
            remove_phone,
            replace_phone,
            add_email,
            remove_email,
            replace_email,
        } => {
            let birthday = match (birthday, clear_birthday) {
                (Some(value), _) => Some(BirthdayChange::Set(value)),
                (None, true) => Some(BirthdayChange::Clear),
                (None, false) => None,
            };
            let edit = ContactEdit {
                name,
                birthday,
                add_phones: add_phone,
                remove_phones: remove_phone,
                replace_phones: pairs(replace_phone),
                add_emails: add_email,
                remove_emails: remove_email,
                replace_emails: pairs(replace_email),
            };

            let record = service.update(id, &edit)?;
            println!("Updated contact: {}", record.render(today, policy));
            Ok(true)
        }

        ContactCommands::Birthdays { within } => {
            let upcoming = service.upcoming_birthdays(today, within, policy);
            if upcoming.is_empty() {
                println!("No birthdays in the next {} day(s).", within);
            }
            for (days, record) in upcoming {
                let when = match days {
                    0 => "today".to_string(),
                    1 => "tomorrow".to_string(),
                    n => format!("in {} days", n),
                };
                let birthday = record
                    .birthday
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                println!("{:<12} {} ({})", when, record.name, birthday);
            }
            Ok(false)
        }

        ContactCommands::History { limit } => {
            let Some(audit) = audit else {
                println!("Audit logging is disabled.");
                return Ok(false);
            };
            let entries = audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
            Ok(false)
        }
    }
}

/// Group a flat `OLD NEW OLD NEW ...` list into pairs
fn pairs(values: Vec<String>) -> Vec<(String, String)> {
    let mut iter = values.into_iter();
    let mut pairs = Vec::new();
    while let (Some(old), Some(new)) = (iter.next(), iter.next()) {
        pairs.push((old, new));
    }
    pairs
}
