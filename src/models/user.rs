//! User model
//!
//! A catalog user and the boundary validation applied to user input before it
//! reaches the service layer.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::audit::{AuditField, Auditable};
use crate::storage::Entity;

/// A catalog user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity, supplied by the caller and fixed once stored
    pub id: UserId,

    pub forename: String,

    pub surname: String,

    /// Not required to be unique
    pub email: String,

    pub is_active: bool,

    pub date_of_birth: NaiveDate,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: UserId,
        forename: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id,
            forename: forename.into(),
            surname: surname.into(),
            email: email.into(),
            is_active: true,
            date_of_birth,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    /// Validate the user, collecting every failing rule
    pub fn validate(&self) -> Result<(), Vec<UserValidationError>> {
        let mut errors = Vec::new();

        if self.forename.trim().is_empty() {
            errors.push(UserValidationError::EmptyForename);
        }

        if self.surname.trim().is_empty() {
            errors.push(UserValidationError::EmptySurname);
        }

        if self.email.trim().is_empty() {
            errors.push(UserValidationError::EmptyEmail);
        } else if !is_valid_email(self.email.trim()) {
            errors.push(UserValidationError::InvalidEmail(self.email.clone()));
        }

        if self.date_of_birth > Utc::now().date_naive() {
            errors.push(UserValidationError::FutureDateOfBirth(self.date_of_birth));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Entity for User {
    type Id = UserId;
    const ENTITY_TYPE: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }
}

impl Auditable for User {
    fn audit_fields(&self) -> Vec<AuditField> {
        vec![
            AuditField::new("Forename", &self.forename),
            AuditField::new("Surname", &self.surname),
            AuditField::new("Email", &self.email),
            AuditField::new("IsActive", self.is_active),
            AuditField::new("DateOfBirth", self.date_of_birth.format("%Y-%m-%d")),
        ]
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.full_name(), self.email)
    }
}

/// `local@label(.label)+`, where each domain label is alphanumeric with
/// inner hyphens
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid email regex")
});

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyForename,
    EmptySurname,
    EmptyEmail,
    InvalidEmail(String),
    FutureDateOfBirth(NaiveDate),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyForename => write!(f, "Forename is required"),
            Self::EmptySurname => write!(f, "Surname is required"),
            Self::EmptyEmail => write!(f, "Email is required"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::FutureDateOfBirth(date) => {
                write!(f, "Date of birth cannot be in the future: {}", date)
            }
        }
    }
}

impl std::error::Error for UserValidationError {}
