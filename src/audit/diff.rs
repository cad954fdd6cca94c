//! Diff generation for audit logging
//!
//! Entities list their audited fields in a fixed order; the diff walks both
//! snapshots in that order and describes each field whose rendered value
//! differs.

use std::fmt;

/// One audited field of an entity snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditField {
    pub name: &'static str,
    pub value: String,
}

impl AuditField {
    pub fn new(name: &'static str, value: impl fmt::Display) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// Entities whose changes can be described field by field
pub trait Auditable {
    /// Audited fields, always in the same declared order
    fn audit_fields(&self) -> Vec<AuditField>;
}

/// Describe every field that differs between two snapshots of the same entity
///
/// One `<Field> changed from '<old>' to '<new>'` line per differing field,
/// joined by newlines. Identical snapshots yield an empty string.
pub fn generate_diff<T: Auditable>(before: &T, after: &T) -> String {
    diff_lines(before, after).join("\n")
}

/// The individual lines of [`generate_diff`]
pub fn diff_lines<T: Auditable>(before: &T, after: &T) -> Vec<String> {
    before
        .audit_fields()
        .into_iter()
        .zip(after.audit_fields())
        .filter(|(old, new)| old.value != new.value)
        .map(|(old, new)| {
            format!(
                "{} changed from '{}' to '{}'",
                old.name, old.value, new.value
            )
        })
        .collect()
}
