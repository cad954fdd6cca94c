//! Display formatting for terminal output
//!
//! Provides formatting functions for rendering users and audit records in the
//! terminal.

pub mod audit;
pub mod user;

pub use audit::{format_log_details, format_log_list, format_log_page, paginate_logs, LogPage};
pub use user::{format_user_details, format_user_list};
