//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Record, RecordId};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was added
    Create,
    /// Record was edited
    Update,
    /// Record was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// Record IDs are recycled, so the record name is stored alongside the ID
/// to keep old entries meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// ID the record had at the time of the operation
    pub record_id: RecordId,

    /// Record name at the time of the operation
    pub record_name: String,

    /// The record before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable description of what changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a newly added record
    pub fn create(id: RecordId, record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            record_id: id,
            record_name: record.name.to_string(),
            before: None,
            after: serde_json::to_value(record).ok(),
            summary: None,
        }
    }

    /// Entry for an edited record
    pub fn update(id: RecordId, before: &Record, after: &Record, summary: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            record_id: id,
            record_name: after.name.to_string(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            summary,
        }
    }

    /// Entry for a deleted record
    pub fn delete(id: RecordId, record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            record_id: id,
            record_name: record.name.to_string(),
            before: serde_json::to_value(record).ok(),
            after: None,
            summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} ID {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.record_id,
            self.record_name
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  Changes: {}", summary));
        }

        output
    }
}
