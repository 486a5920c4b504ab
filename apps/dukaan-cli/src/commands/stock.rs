//! # Stock Commands

use anyhow::{bail, Result};
use clap::Subcommand;

use dukaan_core::{Money, Product};
use dukaan_store::{KeyValueStore, NewProduct, Repository};

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Take a new product into stock
    Add {
        /// Classification, e.g. "Mobile", "Laptop", "Accessory"
        #[arg(long)]
        category: String,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        /// Optional serial/IMEI/SKU
        #[arg(long)]
        identifier: Option<String>,

        /// Purchase price per unit, in rupees
        #[arg(long)]
        purchase: i64,

        /// Selling price per unit, in rupees
        #[arg(long)]
        sell: i64,

        /// Units taken into stock
        #[arg(long, default_value_t = 1)]
        quantity: i64,

        /// Optional photo reference
        #[arg(long)]
        photo: Option<String>,
    },

    /// List stock, optionally filtered by a search term
    List {
        /// Case-insensitive match on category, brand, model, or identifier
        query: Option<String>,
    },

    /// Edit an existing product
    Update {
        /// Product id
        id: String,

        /// New purchase price, in rupees
        #[arg(long)]
        purchase: Option<i64>,

        /// New selling price, in rupees
        #[arg(long)]
        sell: Option<i64>,

        /// New quantity
        #[arg(long)]
        quantity: Option<i64>,
    },

    /// Remove a product from stock
    Delete {
        /// Product id
        id: String,
    },
}

pub fn run<S: KeyValueStore>(repo: &mut Repository<S>, cmd: StockCommand) -> Result<()> {
    match cmd {
        StockCommand::Add {
            category,
            brand,
            model,
            identifier,
            purchase,
            sell,
            quantity,
            photo,
        } => {
            let product = repo.add_product(NewProduct {
                category,
                brand,
                model,
                identifier,
                purchase_price: Money::from_rupees(purchase),
                selling_price: Money::from_rupees(sell),
                quantity,
                photo,
            })?;

            println!("Added {} ({} units)", product.display_name(), product.quantity);
            println!("  id: {}", product.id);
            Ok(())
        }

        StockCommand::List { query } => {
            let products = repo.search_products(query.as_deref().unwrap_or(""));
            if products.is_empty() {
                println!("No products in stock.");
                return Ok(());
            }

            for product in products {
                print_product(product);
            }
            Ok(())
        }

        StockCommand::Update {
            id,
            purchase,
            sell,
            quantity,
        } => {
            let Some(product) = repo.product(&id) else {
                bail!("Product not found: {id}");
            };

            let mut edited = product.clone();
            if let Some(purchase) = purchase {
                edited.purchase_price = Money::from_rupees(purchase);
            }
            if let Some(sell) = sell {
                edited.selling_price = Money::from_rupees(sell);
            }
            if let Some(quantity) = quantity {
                edited.quantity = quantity;
            }

            repo.update_product(edited)?;
            println!("Updated product {id}");
            Ok(())
        }

        StockCommand::Delete { id } => {
            let removed = repo.delete_product(&id)?;
            println!("Removed {} from stock", removed.display_name());
            Ok(())
        }
    }
}

fn print_product(product: &Product) {
    println!(
        "{}  [{}] {}  qty {}  buy {}  sell {}{}",
        product.id,
        product.category,
        product.display_name(),
        product.quantity,
        product.purchase_price,
        product.selling_price,
        product
            .identifier
            .as_deref()
            .map(|ident| format!("  ({ident})"))
            .unwrap_or_default(),
    );
}
