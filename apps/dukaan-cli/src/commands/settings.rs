//! # Settings, PIN, Backup, and Reset Commands

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use chrono::Utc;

use dukaan_store::{KeyValueStore, Repository};

use super::prompt;

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current preferences
    Show,

    /// Change one or more preferences
    Set {
        #[arg(long)]
        owner_name: Option<String>,

        #[arg(long)]
        owner_email: Option<String>,

        #[arg(long)]
        owner_phone: Option<String>,

        /// Label shown for credit entries
        #[arg(long)]
        credit_label: Option<String>,

        /// Label shown for debit entries
        #[arg(long)]
        debit_label: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PinCommand {
    /// Store a PIN for the lock screen
    Set {
        /// The PIN to store
        pin: String,
    },

    /// Remove the stored PIN
    Clear,

    /// Show whether a PIN is set
    Status,
}

pub fn run<S: KeyValueStore>(repo: &mut Repository<S>, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show => {
            let settings = repo.settings();
            println!("Owner name:   {}", settings.owner_name);
            println!("Owner email:  {}", or_dash(&settings.owner_email));
            println!("Owner phone:  {}", or_dash(&settings.owner_phone));
            println!("Credit label: {}", settings.credit_label);
            println!("Debit label:  {}", settings.debit_label);
            Ok(())
        }

        SettingsCommand::Set {
            owner_name,
            owner_email,
            owner_phone,
            credit_label,
            debit_label,
        } => {
            let mut settings = repo.settings().clone();

            if let Some(owner_name) = owner_name {
                settings.owner_name = owner_name;
            }
            if let Some(owner_email) = owner_email {
                settings.owner_email = owner_email;
            }
            if let Some(owner_phone) = owner_phone {
                settings.owner_phone = owner_phone;
            }
            if let Some(credit_label) = credit_label {
                settings.credit_label = credit_label;
            }
            if let Some(debit_label) = debit_label {
                settings.debit_label = debit_label;
            }

            repo.update_settings(settings)?;
            println!("Settings saved.");
            Ok(())
        }
    }
}

pub fn run_pin<S: KeyValueStore>(repo: &mut Repository<S>, cmd: PinCommand) -> Result<()> {
    match cmd {
        PinCommand::Set { pin } => {
            repo.set_pin(pin)?;
            println!("PIN set.");
            Ok(())
        }
        PinCommand::Clear => {
            repo.clear_pin()?;
            println!("PIN cleared.");
            Ok(())
        }
        PinCommand::Status => {
            match repo.pin() {
                Some(_) => println!("A PIN is set."),
                None => println!("No PIN set."),
            }
            Ok(())
        }
    }
}

/// Writes the backup document to `out`, or prints it when no path is given.
pub fn run_backup<S: KeyValueStore>(repo: &Repository<S>, out: Option<PathBuf>) -> Result<()> {
    let document = repo.export_backup()?;

    match out {
        Some(path) => {
            fs::write(&path, document)?;
            println!("Backup written to {}", path.display());
        }
        None => {
            // Default filename hint for redirects; the document itself goes
            // to stdout.
            eprintln!(
                "hint: dukaan backup --out dukaan-backup-{}.json",
                Utc::now().format("%Y-%m-%d")
            );
            println!("{document}");
        }
    }
    Ok(())
}

/// Clears all data behind a two-step typed confirmation.
pub fn run_reset<S: KeyValueStore>(repo: &mut Repository<S>) -> Result<()> {
    println!("This will delete all data permanently. This action cannot be undone.");
    let first = prompt("Type 'RESET' to confirm:")?;
    if first != "RESET" {
        println!("Aborted.");
        return Ok(());
    }

    let second = prompt("Are you absolutely sure? Type 'DELETE ALL DATA' to proceed:")?;
    if second != "DELETE ALL DATA" {
        println!("Aborted.");
        return Ok(());
    }

    repo.reset()?;
    println!("All data cleared. The shop starts fresh.");
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
