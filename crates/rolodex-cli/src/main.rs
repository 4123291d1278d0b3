//! Rolodex CLI
//!
//! Command-line interface for Rolodex - a local contact book.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rolodex_core::{Config, ContactStore, SortKey};

mod commands;
mod output;
mod prompt;
mod tui;

use commands::contact::ContactEdits;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "Rolodex - Local contact book")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an alternate config file
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a new contact
    #[command(alias = "create")]
    Add {
        /// Full name
        name: String,
        /// Phone number (digits only, at least 5)
        phone: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Update the contact with the given phone number
    #[command(alias = "edit")]
    Update {
        /// Current phone number of the contact
        old_phone: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// New email address (empty string clears it)
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Delete the contact with the given phone number
    #[command(alias = "rm")]
    Delete {
        /// Phone number of the contact
        phone: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all contacts
    #[command(alias = "ls")]
    List {
        /// Order for this listing (name, phone, email)
        #[arg(short, long)]
        sort: Option<SortKey>,
    },
    /// Search contacts by name, phone or email
    Search {
        /// Search query
        query: String,
    },
    /// Show a single contact
    Show {
        /// Phone number of the contact
        phone: String,
    },
    /// Delete every contact
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, default_sort)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config_path.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config_path.as_ref())
        .context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        Some(Commands::Tui) | None => return tui::run(&config),
        Some(command) => command,
    };

    init_cli_logging();

    let (mut store, report) = ContactStore::open_with_config(&config);
    if report.is_error() {
        output.load_warning(&report);
    }

    match command {
        Commands::Add { name, phone, email } => {
            commands::contact::add(&mut store, name, phone, email, &output)
        }
        Commands::Update {
            old_phone,
            name,
            phone,
            email,
        } => {
            let edits = ContactEdits { name, phone, email };
            commands::contact::update(&mut store, old_phone, edits, &output)
        }
        Commands::Delete { phone, yes } => {
            commands::contact::delete(&mut store, phone, yes, &output)
        }
        Commands::List { sort } => {
            commands::contact::list(&mut store, sort.or(config.default_sort), &output)
        }
        Commands::Search { query } => commands::contact::search(&store, query, &output),
        Commands::Show { phone } => commands::contact::show(&store, phone, &output),
        Commands::Clear { yes } => commands::contact::clear(&mut store, yes, &output),
        Commands::Status => commands::status::show(&store, &report, &output),
        Commands::Tui | Commands::Config { .. } => Ok(()), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Log to stderr when ROLODEX_LOG is set
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("ROLODEX_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "rolodex_core={},rolodex_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
