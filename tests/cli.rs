//! End-to-end tests for the usercat binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn usercat(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("usercat").unwrap();
    cmd.env("USERCAT_DATA_DIR", config_dir.path())
        .env_remove("USERCAT_LOG");
    cmd
}

#[test]
fn test_list_seeded_users() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Johnny Blaze"))
        .stdout(predicate::str::contains("Total: 11 users"));
}

#[test]
fn test_list_active_users() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["user", "list", "--active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 7 users"))
        .stdout(predicate::str::contains("Castor Troy").not());
}

#[test]
fn test_no_seed_starts_empty() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["--no-seed", "user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users found."));
}

#[test]
fn test_show_missing_user() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["user", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 99 does not exist."));
}

#[test]
fn test_show_user_with_history() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["user", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Peter Loew"))
        .stdout(predicate::str::contains("User Created."));
}

#[test]
fn test_edit_user() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["user", "edit", "10", "--forename", "Koopa"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Updated user: Koopa Blaze <jblaze@example.com>",
        ));
}

#[test]
fn test_create_rejects_invalid_email() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args([
            "user",
            "create",
            "--id",
            "20",
            "--forename",
            "A",
            "--surname",
            "B",
            "--email",
            "not-an-email",
            "--dob",
            "1990-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email address: not-an-email"));
}

#[test]
fn test_create_duplicate_id() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args([
            "user",
            "create",
            "--id",
            "1",
            "--forename",
            "A",
            "--surname",
            "B",
            "--email",
            "a@b.com",
            "--dob",
            "1990-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists: 1"));
}

#[test]
fn test_invalid_log_page() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["logs", "list", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page number."));
}

#[test]
fn test_logs_list_first_page() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["logs", "list", "--page-size", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 3 (11 records)"));
}

#[test]
fn test_missing_log_record() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .args(["logs", "show", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AuditRecord 500 does not exist."));
}

#[test]
fn test_shell_keeps_state_between_commands() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .arg("shell")
        .write_stdin(
            "user create --id 12 --forename A --surname B --email a@b.com --dob 1990-01-01\n\
             user edit 12 --forename C\n\
             user edit 12 --forename D\n\
             logs user 12\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user: A B <a@b.com>"))
        .stdout(predicate::str::contains("Forename changed from 'A' to 'C'"))
        .stdout(predicate::str::contains("Forename changed from 'C' to 'D'"));
}

#[test]
fn test_shell_reports_errors_and_continues() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .arg("shell")
        .write_stdin("user delete 3\nuser delete 3\nuser list --inactive\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted user: Castor Troy"))
        .stderr(predicate::str::contains("User 3 does not exist."))
        .stdout(predicate::str::contains("Total: 3 users"));
}

#[test]
fn test_shell_recovers_from_unknown_command() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .arg("shell")
        .write_stdin("frobnicate\nuser edit 1 --forename \"unterminated\nuser show 10\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("frobnicate"))
        .stderr(predicate::str::contains("Unterminated quote"))
        .stdout(predicate::str::contains("Johnny Blaze"));
}

#[test]
fn test_export_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out").join("catalog.json");
    usercat(&dir)
        .arg("export")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 11 users and 11 audit records"));

    let contents = std::fs::read_to_string(&target).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["users"].as_array().unwrap().len(), 11);
}

#[test]
fn test_settings_disable_seed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"seed_sample_data": false}"#,
    )
    .unwrap();

    usercat(&dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users found."));
}

#[test]
fn test_json_log_format() {
    let dir = TempDir::new().unwrap();
    usercat(&dir)
        .env("USERCAT_LOG", "info")
        .args(["--log-format", "json", "user", "edit", "10", "--forename", "Koopa"])
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""message":"change recorded""#));
}
