//! # Command Modules
//!
//! One module per command family, each a thin wrapper: parse, call the
//! repository, print.
//!
//! - [`stock`] - Stock intake, listing, edits, deletion
//! - [`sale`] - Cash/credit sales, sales history, profit totals
//! - [`khata`] - Customer accounts and ledger entries
//! - [`settings`] - Preferences, PIN, backup, reset

pub mod khata;
pub mod sale;
pub mod settings;
pub mod stock;

use std::io::{self, Write};

use anyhow::Result;

/// Prints a question and reads one trimmed line from stdin.
///
/// Used by the destructive-action confirmation gates.
pub(crate) fn prompt(question: &str) -> Result<String> {
    print!("{question} ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}
