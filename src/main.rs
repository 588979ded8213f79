use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use addrbook::audit::AuditLogger;
use addrbook::cli::{handle_contact_command, handle_export_command, ContactCommands, ExportArgs, Shell};
use addrbook::config::{paths::AddrBookPaths, settings::Settings};
use addrbook::storage::BookStore;

#[derive(Parser)]
#[command(
    name = "addrbook",
    version,
    about = "Terminal address book",
    long_about = "addrbook keeps contacts (names, phone numbers, email addresses and \
                  birthdays) in a local file. Run it without a command to start the \
                  interactive shell."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell
    Shell,

    #[command(flatten)]
    Contact(ContactCommands),

    /// Export the address book
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = AddrBookPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "Resolved paths");

    let store = BookStore::new(paths.book_file());
    let audit_logger = AuditLogger::new(paths.audit_log());
    let audit = settings.audit_enabled.then_some(&audit_logger);

    match cli.command {
        None | Some(Commands::Shell) => {
            let mut book = store.load()?;
            let stdin = io::stdin();
            let mut shell = Shell::new(stdin.lock(), io::stdout(), &mut book, &store, &settings);
            if let Some(audit) = audit {
                shell = shell.with_audit(audit);
            }
            shell.run()?;
        }
        Some(Commands::Contact(cmd)) => {
            handle_contact_command(&store, audit, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let book = store.load()?;
            handle_export_command(&book, args)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            println!("addrbook Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Address book:   {}", paths.book_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Page size:        {}", settings.page_size);
            println!("  Leap day policy:  {:?}", settings.leap_day_policy);
            println!("  Audit enabled:    {}", settings.audit_enabled);
        }
    }

    Ok(())
}
