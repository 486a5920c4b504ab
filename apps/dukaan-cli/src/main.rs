//! # Dukaan CLI Entry Point
//!
//! Parses arguments, opens the repository over the resolved data directory,
//! and dispatches to the command modules. Keep this file thin: no business
//! logic lives here.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dukaan_store::{JsonFileStore, Repository};

#[derive(Parser)]
#[command(
    name = "dukaan",
    version,
    about = "Shop counter: stock, sales, and customer khata"
)]
struct Cli {
    /// Data directory override (also honored as DUKAAN_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage stock
    #[command(subcommand)]
    Stock(commands::stock::StockCommand),

    /// Sell one unit, for cash or on credit
    #[command(subcommand)]
    Sell(commands::sale::SellCommand),

    /// Sales history and profit totals
    #[command(subcommand)]
    Sales(commands::sale::SalesCommand),

    /// Customer accounts and the credit ledger
    #[command(subcommand)]
    Khata(commands::khata::KhataCommand),

    /// Owner preferences
    #[command(subcommand)]
    Settings(commands::settings::SettingsCommand),

    /// PIN credential for the lock screen
    #[command(subcommand)]
    Pin(commands::settings::PinCommand),

    /// Export all data as one JSON document
    Backup {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete all data and start over (asks twice)
    Reset,
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "Opening repository");

    let store = JsonFileStore::open(&data_dir)?;
    let mut repo = Repository::open(store)?;

    match cli.command {
        Command::Stock(cmd) => commands::stock::run(&mut repo, cmd),
        Command::Sell(cmd) => commands::sale::run_sell(&mut repo, cmd),
        Command::Sales(cmd) => commands::sale::run_sales(&repo, cmd),
        Command::Khata(cmd) => commands::khata::run(&mut repo, cmd),
        Command::Settings(cmd) => commands::settings::run(&mut repo, cmd),
        Command::Pin(cmd) => commands::settings::run_pin(&mut repo, cmd),
        Command::Backup { out } => commands::settings::run_backup(&repo, out),
        Command::Reset => commands::settings::run_reset(&mut repo),
    }
}
