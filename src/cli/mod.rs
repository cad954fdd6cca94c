//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod logs;
pub mod shell;
pub mod user;

pub use logs::{handle_logs_command, LogsCommands};
pub use shell::run_shell;
pub use user::{handle_user_command, UserCommands};

use crate::error::CatalogError;

/// User-facing message for an error
///
/// Missing records read as "does not exist"; tracking conflicts and storage
/// faults are reported as a generic failure.
pub fn describe_error(err: &CatalogError) -> String {
    match err {
        CatalogError::NotFound {
            entity_type,
            identifier,
        } => format!("{} {} does not exist.", entity_type, identifier),
        CatalogError::ConflictingTracker { .. } | CatalogError::Storage(_) => {
            "The operation could not be completed. Please try again.".to_string()
        }
        other => format!("Error: {}", other),
    }
}
