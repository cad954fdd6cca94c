//! Audit logging system for usercat
//!
//! Records every create, update and delete of a user as an append-only,
//! immutable audit record.
//!
//! # Architecture
//!
//! - `AuditRecord`: one entry with store-assigned id, subject, action tag,
//!   change description and UTC timestamp.
//! - `AuditLog` / `AuditLogger`: appends records through the entity store and
//!   reads them back by id or subject.
//! - `generate_diff`: field-ordered description of what changed between two
//!   snapshots of an `Auditable` entity.
//!
//! # Example
//!
//! ```rust,ignore
//! use usercat::audit::{generate_diff, AuditLog, AuditLogger};
//!
//! let logger = AuditLogger::new(&context);
//! logger.log_change(user.id, "Update", &generate_diff(&before, &user))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{diff_lines, generate_diff, AuditField, Auditable};
pub use entry::{AuditRecord, Operation};
pub use logger::{AuditLog, AuditLogger};
