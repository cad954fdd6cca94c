//! Audit log CLI commands

use clap::Subcommand;

use crate::audit::{AuditLog, AuditLogger};
use crate::config::Settings;
use crate::display::{format_log_details, format_log_list, format_log_page, paginate_logs};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{AuditId, UserId};
use crate::services::UserService;
use crate::storage::DataContext;

/// Audit log subcommands
#[derive(Subcommand, Debug)]
pub enum LogsCommands {
    /// List audit records a page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Records per page (defaults to the configured page size)
        #[arg(short = 's', long)]
        page_size: Option<usize>,
    },
    /// Show a single audit record
    Show {
        /// Audit record ID
        id: AuditId,
    },
    /// Show every audit record for a user
    User {
        /// User ID
        id: UserId,
    },
}

/// Handle an audit log command
pub fn handle_logs_command(
    context: &DataContext,
    settings: &Settings,
    cmd: LogsCommands,
) -> CatalogResult<()> {
    let logger = AuditLogger::new(context);

    match cmd {
        LogsCommands::List { page, page_size } => {
            let page_size = page_size.unwrap_or(settings.logs_page_size);
            let page = paginate_logs(logger.get_all_logs()?, page, page_size)?;
            print!("{}", format_log_page(&page));
        }

        LogsCommands::Show { id } => {
            let record = logger
                .get_log_by_id(id)?
                .ok_or_else(|| CatalogError::audit_record_not_found(id))?;
            print!("{}", format_log_details(&record));
        }

        LogsCommands::User { id } => {
            let records = logger.get_logs_for_user(id)?;
            let service = UserService::new(context, &logger);
            if service.get_by_id(id)?.is_none() {
                println!("User {} no longer exists. They have either been deleted or never existed.", id);
            }
            print!("{}", format_log_list(&records));
        }
    }

    Ok(())
}
