//! Interactive shell
//!
//! Keeps one catalog alive across commands read with a line editor. Each line
//! is one unit of work: it starts a fresh tracking generation, so handles left
//! over from earlier commands never count against later edits.

use std::io::{self, IsTerminal};

use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use super::{describe_error, handle_logs_command, handle_user_command, LogsCommands, UserCommands};
use crate::config::Settings;
use crate::error::{CatalogError, CatalogResult};
use crate::storage::DataContext;

const PROMPT: &str = "usercat> ";

#[derive(Parser, Debug)]
#[command(name = "usercat", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Audit log commands
    #[command(subcommand)]
    Logs(LogsCommands),

    /// Write the catalog to a JSON file
    Export { file: std::path::PathBuf },

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Split a command line into words with shell quoting rules
pub fn split_words(line: &str) -> CatalogResult<Vec<String>> {
    shlex::split(line).ok_or_else(|| CatalogError::Validation("Unterminated quote".into()))
}

/// Run the shell until `exit`, Ctrl-D or end of input
pub fn run_shell(context: &DataContext, settings: &Settings) -> CatalogResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CatalogError::Config(format!("Failed to create line editor: {}", e)))?;

    if io::stdin().is_terminal() {
        println!("usercat shell. Type 'help' for commands, 'exit' to leave.");
    }

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!(error = %e, "line editor failed");
                return Err(CatalogError::Io(format!("Failed to read input: {}", e)));
            }
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(err) => {
                eprintln!("{}", describe_error(&err));
                continue;
            }
        };
        if let Err(e) = editor.add_history_entry(line.trim()) {
            debug!(error = %e, "history entry dropped");
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                // clap renders help and usage errors itself
                err.print()?;
                continue;
            }
        };

        let generation = context.begin_tracking_generation()?;
        debug!(generation, command = %line.trim(), "shell command");

        let result = match parsed.command {
            ShellCommand::User(cmd) => handle_user_command(context, settings, cmd),
            ShellCommand::Logs(cmd) => handle_logs_command(context, settings, cmd),
            ShellCommand::Export { file } => context.export_snapshot(&file).map(|snapshot| {
                println!(
                    "Exported {} users and {} audit records to {}",
                    snapshot.users.len(),
                    snapshot.audit_records.len(),
                    file.display()
                );
            }),
            ShellCommand::Exit => break,
        };

        if let Err(err) = result {
            eprintln!("{}", describe_error(&err));
        }
    }

    Ok(())
}
