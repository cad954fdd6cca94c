//! Audit record data structures
//!
//! Defines the audit record format and the actions the user service records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AuditId, UserId};
use crate::storage::{Entity, StoreAssignedId};

/// Types of operations the user service audits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl Operation {
    /// Action tag stored on the record
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit log entry
///
/// Immutable once stored. The subject is a soft reference: the user it names
/// may since have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Assigned by the store
    pub id: AuditId,

    /// User the change applies to, if any
    pub subject_id: Option<UserId>,

    /// Free-text action tag ("Create", "Update", "Delete", ...)
    pub action: String,

    /// Diff or note describing the change
    pub changes: String,

    /// When the record was created (UTC)
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Create an unsaved record stamped with the current time. The id is a
    /// placeholder until the store assigns one.
    pub fn new(
        subject_id: Option<UserId>,
        action: impl Into<String>,
        changes: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditId::new(0),
            subject_id,
            action: action.into(),
            changes: changes.into(),
            timestamp: Utc::now(),
        }
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] #{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.id,
            self.action,
        );

        match self.subject_id {
            Some(subject) => output.push_str(&format!(" user {}", subject)),
            None => output.push_str(" (no subject)"),
        }

        for line in self.changes.lines() {
            output.push_str(&format!("\n  {}", line));
        }

        output
    }
}

impl Entity for AuditRecord {
    type Id = AuditId;
    const ENTITY_TYPE: &'static str = "AuditRecord";

    fn id(&self) -> AuditId {
        self.id
    }
}

impl StoreAssignedId for AuditRecord {
    fn assign_id(&mut self, id: AuditId) {
        self.id = id;
    }
}
