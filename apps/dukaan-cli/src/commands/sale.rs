//! # Sale Commands

use anyhow::Result;
use clap::Subcommand;

use dukaan_store::{KeyValueStore, Repository};

#[derive(Debug, Subcommand)]
pub enum SellCommand {
    /// Sell one unit for cash
    Cash {
        /// Product id
        product_id: String,
    },

    /// Sell one unit on credit, charged to a customer's khata
    Credit {
        /// Product id
        product_id: String,

        /// Customer id to charge
        customer_id: String,

        /// Optional condition note, e.g. "Pay by end of month"
        #[arg(long)]
        condition: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SalesCommand {
    /// Sales history, oldest first
    List,

    /// Revenue, cost, and profit totals
    Summary,
}

pub fn run_sell<S: KeyValueStore>(repo: &mut Repository<S>, cmd: SellCommand) -> Result<()> {
    match cmd {
        SellCommand::Cash { product_id } => {
            let sale = repo.sell_cash(&product_id)?;
            println!(
                "Sold {} for {} (profit {})",
                sale.product.display_name(),
                sale.product.selling_price,
                sale.profit
            );
            print_remaining(repo, &product_id);
            Ok(())
        }

        SellCommand::Credit {
            product_id,
            customer_id,
            condition,
        } => {
            let outcome = repo.sell_on_credit(&product_id, &customer_id, condition.as_deref())?;
            let customer_name = repo
                .customer(&customer_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| customer_id.clone());

            println!(
                "Sold {} on credit to {}",
                outcome.sale.product.display_name(),
                customer_name
            );
            println!(
                "  khata: {} {} ({})",
                outcome.entry.entry_type, outcome.entry.amount, outcome.entry.description
            );
            if let Some(condition) = &outcome.entry.condition {
                println!("  note: {condition}");
            }
            print_remaining(repo, &product_id);
            Ok(())
        }
    }
}

pub fn run_sales<S: KeyValueStore>(repo: &Repository<S>, cmd: SalesCommand) -> Result<()> {
    match cmd {
        SalesCommand::List => {
            if repo.sales().is_empty() {
                println!("No sales recorded yet.");
                return Ok(());
            }

            for sale in repo.sales() {
                println!(
                    "{}  {}  sold {}  profit {}",
                    sale.date_sold.format("%d %b %Y %H:%M"),
                    sale.product.display_name(),
                    sale.product.selling_price,
                    sale.profit
                );
            }
            Ok(())
        }

        SalesCommand::Summary => {
            let totals = repo.profit_summary();
            println!("Sales: {}", repo.sales().len());
            println!("Total revenue: {}", totals.total_revenue);
            println!("Total cost:    {}", totals.total_cost);
            println!("Total profit:  {}", totals.total_profit);
            Ok(())
        }
    }
}

fn print_remaining<S: KeyValueStore>(repo: &Repository<S>, product_id: &str) {
    match repo.product(product_id) {
        Some(product) => println!("  {} units left in stock", product.quantity),
        None => println!("  last unit sold; product removed from stock"),
    }
}
