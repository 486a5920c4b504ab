//! # Khata Commands

use anyhow::{bail, Result};
use clap::{Subcommand, ValueEnum};

use dukaan_core::{balance_for, EntryType, Money};
use dukaan_store::{KeyValueStore, NewCustomer, NewKhataEntry, Repository};

use super::prompt;

#[derive(Debug, Subcommand)]
pub enum KhataCommand {
    /// Open a new customer account
    AddCustomer {
        /// Customer name
        name: String,

        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// List customers with their current balances
    ListCustomers {
        /// Case-insensitive match on the customer name
        query: Option<String>,
    },

    /// Delete a customer and their entire ledger history
    DeleteCustomer {
        /// Customer id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Record a manual ledger movement
    Entry {
        /// Customer id
        customer_id: String,

        /// Movement direction
        #[arg(long)]
        kind: EntryKind,

        /// Amount in rupees
        #[arg(long)]
        amount: i64,

        /// What this movement was for, e.g. "Payment received"
        #[arg(long)]
        description: String,

        /// Optional condition note
        #[arg(long)]
        condition: Option<String>,
    },

    /// One customer's full ledger with the running balance
    Statement {
        /// Customer id
        customer_id: String,
    },

    /// Portfolio totals across every account
    Summary,
}

/// CLI-facing spelling of [`EntryType`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EntryKind {
    /// Goods or money given on trust; the customer owes more
    Credit,
    /// Repayment received; the customer owes less
    Debit,
}

impl From<EntryKind> for EntryType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Credit => EntryType::Credit,
            EntryKind::Debit => EntryType::Debit,
        }
    }
}

pub fn run<S: KeyValueStore>(repo: &mut Repository<S>, cmd: KhataCommand) -> Result<()> {
    match cmd {
        KhataCommand::AddCustomer { name, phone } => {
            let customer = repo.add_customer(NewCustomer {
                name,
                phone,
                photo: None,
            })?;
            println!("Added customer {}", customer.name);
            println!("  id: {}", customer.id);
            Ok(())
        }

        KhataCommand::ListCustomers { query } => {
            let customers = repo.search_customers(query.as_deref().unwrap_or(""));
            if customers.is_empty() {
                println!("No customers found.");
                return Ok(());
            }

            let balances = repo.customer_balances();
            for customer in customers {
                let balance = balance_for(&balances, &customer.id);
                println!(
                    "{}  {}  {}  balance {}",
                    customer.id,
                    customer.name,
                    customer.phone.as_deref().unwrap_or("-"),
                    balance
                );
            }
            Ok(())
        }

        KhataCommand::DeleteCustomer { id, yes } => {
            let Some(customer) = repo.customer(&id) else {
                bail!("Customer not found: {id}");
            };
            let name = customer.name.clone();
            let entry_count = repo.entries_for(&id).len();

            if !yes {
                println!(
                    "This deletes {name} and {entry_count} ledger entries permanently. \
                     There is no undo."
                );
                let answer = prompt(&format!("Type the customer's name ({name}) to confirm:"))?;
                if answer != name {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let purge = repo.delete_customer(&id)?;
            println!(
                "Deleted {} and {} ledger entries",
                purge.customer.name, purge.entries_removed
            );
            Ok(())
        }

        KhataCommand::Entry {
            customer_id,
            kind,
            amount,
            description,
            condition,
        } => {
            let entry = repo.add_khata_entry(NewKhataEntry {
                customer_id,
                entry_type: kind.into(),
                amount: Money::from_rupees(amount),
                description,
                product_name: None,
                condition,
            })?;

            let label = repo.settings().label_for(entry.entry_type).to_string();
            println!("{label}: {} ({})", entry.amount, entry.description);

            let balances = repo.customer_balances();
            println!(
                "  new balance: {}",
                balance_for(&balances, &entry.customer_id)
            );
            Ok(())
        }

        KhataCommand::Statement { customer_id } => {
            let Some(customer) = repo.customer(&customer_id) else {
                bail!("Customer not found: {customer_id}");
            };

            println!("{}", customer.name);
            if let Some(phone) = &customer.phone {
                println!("{phone}");
            }

            let balances = repo.customer_balances();
            let balance = balance_for(&balances, &customer_id);
            println!("Current balance: {balance}");
            println!();

            let entries = repo.entries_for(&customer_id);
            if entries.is_empty() {
                println!("No transactions recorded yet.");
                return Ok(());
            }

            let settings = repo.settings();
            for entry in entries {
                println!(
                    "{}  {}  {}  {}",
                    entry.date.format("%d %b %Y %H:%M"),
                    settings.label_for(entry.entry_type),
                    entry.amount,
                    entry.description
                );
                if let Some(product_name) = &entry.product_name {
                    println!("    product: {product_name}");
                }
                if let Some(condition) = &entry.condition {
                    println!("    note: {condition}");
                }
            }
            Ok(())
        }

        KhataCommand::Summary => {
            let summary = repo.portfolio();
            println!("Total customers:    {}", summary.total_customers);
            println!("Customers with due: {}", summary.customers_with_due);
            println!("Total receivable:   {}", summary.total_receivable);
            Ok(())
        }
    }
}
