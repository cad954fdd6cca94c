//! Core data models for usercat
//!
//! The catalog's only business entity is the user; audit records live in the
//! `audit` module next to the logger that writes them.

pub mod ids;
pub mod user;

pub use ids::{AuditId, UserId};
pub use user::{User, UserValidationError};
