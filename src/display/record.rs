//! Record display formatting
//!
//! Formats contact records for terminal output in table and detail views.

use chrono::NaiveDate;

use crate::models::{LeapDayPolicy, Record};

/// Format records as an aligned table
pub fn format_record_list(records: &[&Record]) -> String {
    if records.is_empty() {
        return "No contacts found.".to_string();
    }

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
                r.name.to_string(),
                join(&r.phones),
                join(&r.emails),
                r.birthday
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let headers = ["ID", "Name", "Phones", "Emails", "Birthday"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(&headers.map(String::from), &widths));
    output.push_str(&format!(
        "{:->w0$}  {:-<w1$}  {:-<w2$}  {:-<w3$}  {:-<w4$}\n",
        "",
        "",
        "",
        "",
        "",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    ));
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }

    output.push_str(&format!("\nTotal: {} contact(s)", records.len()));
    output
}

fn format_row(row: &[String; 5], widths: &[usize; 5]) -> String {
    let line = format!(
        "{:>w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {:<w4$}",
        row[0],
        row[1],
        row[2],
        row[3],
        row[4],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    );
    format!("{}\n", line.trim_end())
}

/// Format a single record with every field on its own line
pub fn format_record_details(record: &Record, today: NaiveDate, policy: LeapDayPolicy) -> String {
    let mut output = String::new();

    if let Some(id) = record.id() {
        output.push_str(&format!("ID:       {}\n", id));
    }
    output.push_str(&format!("Name:     {}\n", record.name));

    if record.phones.is_empty() {
        output.push_str("Phones:   (none)\n");
    } else {
        output.push_str("Phones:\n");
        for (i, phone) in record.phones.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, phone));
        }
    }

    if record.emails.is_empty() {
        output.push_str("Emails:   (none)\n");
    } else {
        output.push_str("Emails:\n");
        for (i, email) in record.emails.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, email));
        }
    }

    match (&record.birthday, record.days_to_next_birthday(today, policy)) {
        (Some(birthday), Some(days)) => {
            output.push_str(&format!("Birthday: {} (in {} days)\n", birthday, days));
        }
        (Some(birthday), None) => {
            output.push_str(&format!("Birthday: {}\n", birthday));
        }
        (None, _) => output.push_str("Birthday: no birthday set\n"),
    }

    output
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
