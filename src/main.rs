use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use usercat::cli::{
    describe_error, handle_logs_command, handle_user_command, run_shell, LogsCommands,
    UserCommands,
};
use usercat::config::{CatalogPaths, LogFormat, Settings};
use usercat::logging::init_tracing;
use usercat::storage::DataContext;
use usercat::CatalogError;

#[derive(Parser)]
#[command(
    name = "usercat",
    version,
    about = "User catalog with an append-only audit trail",
    long_about = "usercat keeps a catalog of users in memory and records every \
                  create, update and delete in an audit trail. Each process \
                  starts from the sample data set; use 'usercat shell' to run \
                  several commands against the same catalog."
)]
struct Cli {
    /// Start with an empty catalog instead of the sample data
    #[arg(long, global = true)]
    no_seed: bool,

    /// Log output format (overrides the settings file)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Audit log commands
    #[command(subcommand, alias = "log")]
    Logs(LogsCommands),

    /// Write the catalog to a JSON file
    Export {
        /// Target file (defaults to exports/catalog.json in the config directory)
        file: Option<PathBuf>,
    },

    /// Run commands from stdin against one catalog
    #[command(alias = "repl")]
    Shell,

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CatalogError>() {
                Some(catalog_err) => eprintln!("{}", describe_error(catalog_err)),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CatalogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(
        &settings.log_level,
        cli.log_format.unwrap_or(settings.log_format),
    )?;

    let context = if settings.seed_sample_data && !cli.no_seed {
        DataContext::seeded()?
    } else {
        DataContext::new()
    };

    match cli.command {
        Some(Commands::User(cmd)) => handle_user_command(&context, &settings, cmd)?,
        Some(Commands::Logs(cmd)) => handle_logs_command(&context, &settings, cmd)?,
        Some(Commands::Export { file }) => {
            let file = file.unwrap_or_else(|| paths.default_export_file());
            let snapshot = context.export_snapshot(&file)?;
            println!(
                "Exported {} users and {} audit records to {}",
                snapshot.users.len(),
                snapshot.audit_records.len(),
                file.display()
            );
        }
        Some(Commands::Shell) => run_shell(&context, &settings)?,
        Some(Commands::Config) => {
            println!("usercat Configuration");
            println!("=====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Seed sample data: {}", settings.seed_sample_data);
            println!("  Log level:        {}", settings.log_level);
            println!("  Log format:       {:?}", settings.log_format);
            println!("  Logs page size:   {}", settings.logs_page_size);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("usercat - user catalog with an audit trail");
            println!();
            println!("Run 'usercat --help' for usage information.");
            println!("Run 'usercat shell' to work with one catalog interactively.");
        }
    }

    Ok(())
}
