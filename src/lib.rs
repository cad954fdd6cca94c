//! usercat - user catalog with an append-only audit trail
//!
//! This library keeps a small catalog of users in memory and records every
//! change made to them. The core is a generic entity store that detects
//! conflicting in-flight edits, an audit logger that appends immutable change
//! records, and a user service that ties each mutation to exactly one record.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `storage`: generic in-memory entity store with tracked and untracked reads
//! - `audit`: audit records, the audit logger and field-level diffs
//! - `services`: business logic layer (user service)
//! - `models`: user model and typed ids
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `logging`: tracing subscriber setup
//! - `cli` / `display`: command-line front end and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use usercat::audit::AuditLogger;
//! use usercat::services::UserService;
//! use usercat::storage::DataContext;
//!
//! let context = DataContext::seeded()?;
//! let logger = AuditLogger::new(&context);
//! let service = UserService::new(&context, &logger);
//! let mut user = service.get_by_id(10.into())?.unwrap();
//! user.forename = "Koopa".into();
//! service.update(user)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CatalogError, CatalogResult};
