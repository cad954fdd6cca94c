//! Sample data seeding
//!
//! The catalog starts each process from the same fixed set of users, each with
//! the creation record the audit trail would have written for it.

use chrono::NaiveDate;
use tracing::info;

use super::{DataContext, EntityStore, KeyAssigningStore};
use crate::audit::{AuditRecord, Operation};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{User, UserId};

/// (id, forename, surname, email, active, date of birth)
const SAMPLE_USERS: &[(i64, &str, &str, &str, bool, (i32, u32, u32))] = &[
    (1, "Peter", "Loew", "ploew@example.com", true, (1964, 2, 11)),
    (2, "Benjamin Franklin", "Gates", "bfgates@example.com", true, (1971, 7, 4)),
    (3, "Castor", "Troy", "ctroy@example.com", false, (1961, 10, 29)),
    (4, "Memphis", "Raines", "mraines@example.com", true, (1964, 1, 7)),
    (5, "Stanley", "Goodspeed", "sgodspeed@example.com", true, (1966, 6, 7)),
    (6, "H.I.", "McDunnough", "himcdunnough@example.com", true, (1957, 3, 11)),
    (7, "Cameron", "Poe", "cpoe@example.com", false, (1963, 6, 6)),
    (8, "Edward", "Malus", "emalus@example.com", false, (1955, 9, 13)),
    (9, "Damon", "Macready", "dmacready@example.com", false, (1968, 4, 16)),
    (10, "Johnny", "Blaze", "jblaze@example.com", true, (1975, 2, 16)),
    (11, "Robin", "Feld", "rfeld@example.com", true, (1980, 5, 22)),
];

/// The fixed sample users
pub fn sample_users() -> CatalogResult<Vec<User>> {
    SAMPLE_USERS
        .iter()
        .map(|&(id, forename, surname, email, is_active, (y, m, d))| {
            let date_of_birth = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                CatalogError::Config(format!("Invalid sample date of birth for user {}", id))
            })?;
            let mut user = User::new(UserId::new(id), forename, surname, email, date_of_birth);
            user.is_active = is_active;
            Ok(user)
        })
        .collect()
}

/// Load the sample users and their creation records into `context`
pub fn seed_sample_data(context: &DataContext) -> CatalogResult<()> {
    let users = sample_users()?;
    let count = users.len();

    for user in users {
        let id = user.id;
        context.create(user)?;
        context.create_with_generated_id(AuditRecord::new(
            Some(id),
            Operation::Create.as_str(),
            "User Created.",
        ))?;
    }

    info!(users = count, "sample data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_users_are_valid() {
        let users = sample_users().unwrap();
        assert_eq!(users.len(), 11);
        for user in &users {
            assert!(user.validate().is_ok(), "{:?}", user);
        }
        assert_eq!(users.iter().filter(|u| u.is_active).count(), 7);
    }

    #[test]
    fn test_seed_populates_both_tables() {
        let context = DataContext::new();
        seed_sample_data(&context).unwrap();

        assert_eq!(context.users().count().unwrap(), 11);
        assert_eq!(context.audit_records().count().unwrap(), 11);

        let records: Vec<AuditRecord> = context.get_all_no_tracking().unwrap();
        assert!(records
            .iter()
            .all(|r| r.action == "Create" && r.changes == "User Created."));
    }

    #[test]
    fn test_seed_logs_one_create_per_user() {
        let context = DataContext::seeded().unwrap();
        let records: Vec<AuditRecord> = context.get_all_no_tracking().unwrap();

        for user in sample_users().unwrap() {
            let creates = records
                .iter()
                .filter(|r| r.subject_id == Some(user.id))
                .count();
            assert_eq!(creates, 1, "user {}", user.id);
        }
    }

    #[test]
    fn test_seed_twice_is_duplicate() {
        let context = DataContext::new();
        seed_sample_data(&context).unwrap();
        let err = seed_sample_data(&context).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateIdentity { .. }));
    }
}
