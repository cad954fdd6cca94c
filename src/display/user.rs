//! User display formatting
//!
//! Formats users for terminal output in table and detail views.

use crate::audit::AuditRecord;
use crate::models::User;

/// Format a list of users as a table
pub fn format_user_list(users: &[User], date_format: &str) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let name_width = users
        .iter()
        .map(|u| u.full_name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let email_width = users
        .iter()
        .map(|u| u.email.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<email_width$}  {:<6}  {}\n",
        "ID",
        "Name",
        "Email",
        "Active",
        "Date of Birth",
        name_width = name_width,
        email_width = email_width,
    ));

    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<email_width$}  {:-<6}  {:-<13}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        email_width = email_width,
    ));

    for user in users {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<email_width$}  {:<6}  {}\n",
            user.id,
            user.full_name(),
            user.email,
            if user.is_active { "Yes" } else { "No" },
            user.date_of_birth.format(date_format),
            name_width = name_width,
            email_width = email_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} users\n", users.len()));
    output
}

/// Format a single user with their audit trail
pub fn format_user_details(user: &User, records: &[AuditRecord], date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("User:          {}\n", user.full_name()));
    output.push_str(&format!("ID:            {}\n", user.id));
    output.push_str(&format!("Email:         {}\n", user.email));
    output.push_str(&format!(
        "Active:        {}\n",
        if user.is_active { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "Date of Birth: {}\n",
        user.date_of_birth.format(date_format)
    ));

    output.push_str("\nHistory:\n");
    if records.is_empty() {
        output.push_str("  (no audit records)\n");
    }
    for record in records {
        output.push_str(&format!(
            "  #{:<4} {} {}\n",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.action
        ));
        for line in record.changes.lines() {
            output.push_str(&format!("         {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn sample() -> User {
        User::new(
            UserId::new(10),
            "Johnny",
            "Blaze",
            "jblaze@example.com",
            NaiveDate::from_ymd_opt(1975, 2, 16).unwrap(),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_user_list(&[], "%Y-%m-%d"), "No users found.\n");
    }

    #[test]
    fn test_list_contains_rows_and_total() {
        let output = format_user_list(&[sample()], "%d/%m/%Y");
        assert!(output.contains("Johnny Blaze"));
        assert!(output.contains("jblaze@example.com"));
        assert!(output.contains("16/02/1975"));
        assert!(output.contains("Total: 1 users"));
    }

    #[test]
    fn test_details_with_history() {
        let record = AuditRecord::new(
            Some(UserId::new(10)),
            "Update",
            "Forename changed from 'Johnny' to 'Koopa'",
        );
        let output = format_user_details(&sample(), &[record], "%Y-%m-%d");
        assert!(output.contains("ID:            10"));
        assert!(output.contains("Update"));
        assert!(output.contains("Forename changed from 'Johnny' to 'Koopa'"));
    }

    #[test]
    fn test_details_without_history() {
        let output = format_user_details(&sample(), &[], "%Y-%m-%d");
        assert!(output.contains("(no audit records)"));
    }
}
