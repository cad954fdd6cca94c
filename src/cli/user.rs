//! User CLI commands
//!
//! Implements CLI commands for user management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::audit::{AuditLog, AuditLogger};
use crate::config::Settings;
use crate::display::{format_user_details, format_user_list};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{User, UserId};
use crate::services::UserService;
use crate::storage::DataContext;

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Only active users
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Only inactive users
        #[arg(long)]
        inactive: bool,
    },
    /// Show a user and their audit trail
    Show {
        /// User ID
        id: UserId,
    },
    /// Create a new user
    Create {
        /// User ID (must not already exist)
        #[arg(long)]
        id: UserId,
        #[arg(long)]
        forename: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        dob: NaiveDate,
        /// Create the user as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Edit an existing user
    Edit {
        /// User ID
        id: UserId,
        #[arg(long)]
        forename: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        dob: Option<NaiveDate>,
        /// Set the active flag (true/false)
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: UserId,
    },
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

/// Turn a list of validation failures into a single error
fn check_valid(user: &User) -> CatalogResult<()> {
    user.validate().map_err(|errors| {
        CatalogError::Validation(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })
}

/// Handle a user command
pub fn handle_user_command(
    context: &DataContext,
    settings: &Settings,
    cmd: UserCommands,
) -> CatalogResult<()> {
    let logger = AuditLogger::new(context);
    let service = UserService::new(context, &logger);

    match cmd {
        UserCommands::List { active, inactive } => {
            let users = if active {
                service.filter_by_active(true)?
            } else if inactive {
                service.filter_by_active(false)?
            } else {
                service.get_all()?
            };
            print!("{}", format_user_list(&users, &settings.date_format));
        }

        UserCommands::Show { id } => {
            let user = service
                .get_by_id(id)?
                .ok_or_else(|| CatalogError::user_not_found(id))?;
            let records = logger.get_logs_for_user(id)?;
            print!(
                "{}",
                format_user_details(&user, &records, &settings.date_format)
            );
        }

        UserCommands::Create {
            id,
            forename,
            surname,
            email,
            dob,
            inactive,
        } => {
            let mut user = User::new(id, forename, surname, email, dob);
            user.is_active = !inactive;
            check_valid(&user)?;

            let user = service.create(user)?;
            println!("Created user: {}", user);
            println!("  ID: {}", user.id);
        }

        UserCommands::Edit {
            id,
            forename,
            surname,
            email,
            dob,
            active,
        } => {
            let mut user = service
                .get_by_id(id)?
                .ok_or_else(|| CatalogError::user_not_found(id))?;

            if forename.is_none()
                && surname.is_none()
                && email.is_none()
                && dob.is_none()
                && active.is_none()
            {
                println!("No changes specified. Use --forename, --surname, --email, --dob or --active.");
                return Ok(());
            }

            if let Some(forename) = forename {
                user.forename = forename;
            }
            if let Some(surname) = surname {
                user.surname = surname;
            }
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(dob) = dob {
                user.date_of_birth = dob;
            }
            if let Some(active) = active {
                user.is_active = active;
            }
            check_valid(&user)?;

            let user = service.update(user)?;
            println!("Updated user: {}", user);
        }

        UserCommands::Delete { id } => {
            let user = service
                .get_by_id(id)?
                .ok_or_else(|| CatalogError::user_not_found(id))?;

            service.delete(&user)?;
            println!("Deleted user: {}", user);
        }
    }

    Ok(())
}
