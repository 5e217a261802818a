//! Masoro Kitchen CLI - seed data export and validation tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the seed menu as JSON
//! masoro-cli export menu
//!
//! # Write the seed orders to a file
//! masoro-cli export orders -o orders.json
//!
//! # Validate the seed data
//! masoro-cli check
//! ```
//!
//! # Commands
//!
//! - `export` - Dump seed data (menu, orders, staff, settings) as JSON
//! - `check` - Validate seed data against the domain rules

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "masoro-cli")]
#[command(author, version, about = "Masoro Kitchen CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump seed data as JSON
    Export {
        /// Which data set to export
        #[arg(value_enum)]
        target: ExportTarget,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate seed data against the domain rules
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    /// Menu items
    Menu,
    /// Order history
    Orders,
    /// Staff accounts
    Staff,
    /// Restaurant settings
    Settings,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Export { target, output } => match target {
            ExportTarget::Menu => commands::export::menu(output.as_deref())?,
            ExportTarget::Orders => commands::export::orders(output.as_deref())?,
            ExportTarget::Staff => commands::export::staff(output.as_deref())?,
            ExportTarget::Settings => commands::export::settings(output.as_deref())?,
        },
        Commands::Check => commands::check::run()?,
    }
    Ok(())
}
