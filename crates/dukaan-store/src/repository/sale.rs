//! # Sale Transaction Engine
//!
//! All-or-nothing updates across the stock, sales, and khata collections.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Credit Sale, Step by Step                            │
//! │                                                                         │
//! │  sell_on_credit(product_id, customer_id, condition)                    │
//! │                                                                         │
//! │  0. PRECONDITIONS   product exists AND customer exists                 │
//! │                     (either missing → NotFound, zero mutation)         │
//! │                                                                         │
//! │  1. SALE RECORD     snapshot of the product, quantity forced to 1,     │
//! │                     profit = selling - purchase frozen now             │
//! │                                                                         │
//! │  2. KHATA ENTRY     credit for the selling price, description          │
//! │                     "Sold: {brand} {model}"                            │
//! │                                                                         │
//! │  3. STOCK           quantity > 1 → decrement                           │
//! │                     quantity == 1 → remove the product                 │
//! │                                                                         │
//! │  4. COMMIT          sales + khataEntries + stock written together      │
//! │                                                                         │
//! │  Steps 1 and 2 both read the SAME pre-mutation snapshot; the stock     │
//! │  mutation always runs last because it may delete the product.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cash sale is the same transaction minus step 2.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use dukaan_core::ledger::profit_totals;
use dukaan_core::{EntryType, KhataEntry, ProfitTotals, SaleRecord};

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, KeyValueStore};
use crate::repository::Repository;

// =============================================================================
// Output Types
// =============================================================================

/// Everything a credit sale creates.
#[derive(Debug, Clone)]
pub struct CreditSale {
    /// The receipt for the sold unit.
    pub sale: SaleRecord,
    /// The ledger movement charging the customer.
    pub entry: KhataEntry,
}

// =============================================================================
// Sale Operations
// =============================================================================

impl<S: KeyValueStore> Repository<S> {
    /// Sells one unit for cash.
    ///
    /// Creates exactly one [`SaleRecord`] and decrements the product, or
    /// removes it when the last unit goes. The whole update is applied
    /// before a single commit, so no caller observes an intermediate state.
    pub fn sell_cash(&mut self, product_id: &str) -> StoreResult<SaleRecord> {
        let index = self
            .stock
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        let product = self.stock[index].clone();
        let sale = SaleRecord::for_unit(Uuid::new_v4().to_string(), &product, Utc::now());

        self.sales.push(sale.clone());
        self.take_unit_at(index);
        self.commit(&[keys::SALES, keys::STOCK])?;

        info!(
            product = %product.display_name(),
            profit = %sale.profit,
            "Unit sold for cash"
        );
        Ok(sale)
    }

    /// Sells one unit on credit, charging the customer's khata.
    ///
    /// ## Atomicity
    /// Both lookups run before anything is touched: a missing product or a
    /// missing customer returns `NotFound` with zero new records and zero
    /// stock mutation. Once the preconditions hold, the sale record, the
    /// ledger entry, and the stock change land in one commit.
    pub fn sell_on_credit(
        &mut self,
        product_id: &str,
        customer_id: &str,
        condition: Option<&str>,
    ) -> StoreResult<CreditSale> {
        let index = self
            .stock
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;
        if self.customer(customer_id).is_none() {
            return Err(StoreError::not_found("Customer", customer_id));
        }

        // Snapshot before the stock mutation; the receipt and the ledger
        // entry both describe the product as it is right now.
        let product = self.stock[index].clone();
        let now = Utc::now();

        let sale = SaleRecord::for_unit(Uuid::new_v4().to_string(), &product, now);
        let entry = KhataEntry {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            entry_type: EntryType::Credit,
            amount: product.selling_price,
            description: format!("Sold: {}", product.display_name()),
            date: now,
            product_name: Some(product.display_name()),
            condition: condition
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
        };

        self.sales.push(sale.clone());
        self.entries.insert(0, entry.clone());
        self.take_unit_at(index);
        self.commit(&[keys::SALES, keys::KHATA_ENTRIES, keys::STOCK])?;

        info!(
            product = %product.display_name(),
            customer_id = %customer_id,
            amount = %entry.amount,
            "Unit sold on credit"
        );
        Ok(CreditSale { sale, entry })
    }

    /// Profit totals over the full sales history.
    pub fn profit_summary(&self) -> ProfitTotals {
        profit_totals(&self.sales)
    }

    /// Removes one unit from the product at `index`.
    ///
    /// A product never sits in stock with zero quantity: the last unit
    /// takes the product row with it.
    fn take_unit_at(&mut self, index: usize) {
        if self.stock[index].quantity > 1 {
            self.stock[index].quantity -= 1;
        } else {
            self.stock.remove(index);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};
    use crate::repository::khata::NewCustomer;
    use crate::repository::stock::NewProduct;
    use dukaan_core::{balance_for, Money};

    fn repo() -> Repository<MemoryStore> {
        Repository::open(MemoryStore::new()).unwrap()
    }

    fn iphone(quantity: i64) -> NewProduct {
        NewProduct {
            category: "Mobile".to_string(),
            brand: "Apple".to_string(),
            model: "iPhone 14".to_string(),
            identifier: None,
            purchase_price: Money::from_rupees(70_000),
            selling_price: Money::from_rupees(85_000),
            quantity,
            photo: None,
        }
    }

    fn ravi() -> NewCustomer {
        NewCustomer {
            name: "Ravi".to_string(),
            phone: None,
            photo: None,
        }
    }

    #[test]
    fn test_cash_sale_decrements_stock() {
        let mut repo = repo();
        let product = repo.add_product(iphone(3)).unwrap();

        repo.sell_cash(&product.id).unwrap();

        let remaining = repo.product(&product.id).unwrap();
        assert_eq!(remaining.quantity, 2);
        // Every other field is untouched.
        assert_eq!(remaining.brand, product.brand);
        assert_eq!(remaining.selling_price, product.selling_price);
        assert_eq!(remaining.date_added, product.date_added);
    }

    #[test]
    fn test_selling_last_unit_removes_product() {
        let mut repo = repo();
        let product = repo.add_product(iphone(1)).unwrap();

        repo.sell_cash(&product.id).unwrap();

        assert!(repo.product(&product.id).is_none());
        assert!(repo.products().is_empty());
        assert_eq!(repo.sales().len(), 1);
    }

    #[test]
    fn test_sale_record_snapshot_and_profit() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();

        let sale = repo.sell_cash(&product.id).unwrap();
        assert_eq!(sale.profit, Money::from_rupees(15_000));
        assert_eq!(sale.product.quantity, 1);

        // Editing the live product afterwards leaves the receipt alone.
        let mut edited = repo.product(&product.id).unwrap().clone();
        edited.selling_price = Money::from_rupees(95_000);
        edited.purchase_price = Money::from_rupees(60_000);
        repo.update_product(edited).unwrap();

        let stored = &repo.sales()[0];
        assert_eq!(stored.profit, Money::from_rupees(15_000));
        assert_eq!(stored.product.selling_price, Money::from_rupees(85_000));
    }

    #[test]
    fn test_cash_sale_missing_product_is_not_found() {
        let mut repo = repo();
        let result = repo.sell_cash("no-such-product");
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(repo.sales().is_empty());
    }

    #[test]
    fn test_credit_sale_creates_record_and_entry() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();
        let customer = repo.add_customer(ravi()).unwrap();

        let outcome = repo
            .sell_on_credit(&product.id, &customer.id, Some("Pay by Friday"))
            .unwrap();

        assert_eq!(outcome.sale.profit, Money::from_rupees(15_000));
        assert_eq!(outcome.entry.entry_type, EntryType::Credit);
        assert_eq!(outcome.entry.amount, Money::from_rupees(85_000));
        assert_eq!(outcome.entry.customer_id, customer.id);
        assert_eq!(outcome.entry.description, "Sold: Apple iPhone 14");
        assert_eq!(
            outcome.entry.product_name.as_deref(),
            Some("Apple iPhone 14")
        );
        assert_eq!(outcome.entry.condition.as_deref(), Some("Pay by Friday"));

        assert_eq!(repo.sales().len(), 1);
        assert_eq!(repo.khata_entries().len(), 1);
        assert_eq!(repo.product(&product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_credit_sale_blank_condition_is_absent() {
        let mut repo = repo();
        let product = repo.add_product(iphone(1)).unwrap();
        let customer = repo.add_customer(ravi()).unwrap();

        let outcome = repo
            .sell_on_credit(&product.id, &customer.id, Some("   "))
            .unwrap();
        assert!(outcome.entry.condition.is_none());
    }

    #[test]
    fn test_credit_sale_is_all_or_nothing() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();
        let customer = repo.add_customer(ravi()).unwrap();

        // Missing product: nothing happens.
        let result = repo.sell_on_credit("ghost", &customer.id, None);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        // Missing customer: no sale record, no entry, no stock change.
        let result = repo.sell_on_credit(&product.id, "ghost", None);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        assert!(repo.sales().is_empty());
        assert!(repo.khata_entries().is_empty());
        assert_eq!(repo.product(&product.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_sales_append_in_chronological_order() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();

        let first = repo.sell_cash(&product.id).unwrap();
        let second = repo.sell_cash(&product.id).unwrap();

        assert_eq!(repo.sales()[0].id, first.id);
        assert_eq!(repo.sales()[1].id, second.id);
    }

    #[test]
    fn test_profit_summary() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();
        repo.sell_cash(&product.id).unwrap();
        repo.sell_cash(&product.id).unwrap();

        let totals = repo.profit_summary();
        assert_eq!(totals.total_revenue, Money::from_rupees(170_000));
        assert_eq!(totals.total_cost, Money::from_rupees(140_000));
        assert_eq!(totals.total_profit, Money::from_rupees(30_000));
    }

    /// The full credit-sale scenario, end to end, through a real file store.
    #[test]
    fn test_end_to_end_credit_sale() {
        let dir = tempfile::tempdir().unwrap();

        let (product_id, customer_id) = {
            let store = JsonFileStore::open(dir.path()).unwrap();
            let mut repo = Repository::open(store).unwrap();

            let product = repo.add_product(iphone(2)).unwrap();
            let customer = repo.add_customer(ravi()).unwrap();
            repo.sell_on_credit(&product.id, &customer.id, None).unwrap();
            (product.id, customer.id)
        };

        // Everything survives a reopen from disk.
        let store = JsonFileStore::open(dir.path()).unwrap();
        let repo = Repository::open(store).unwrap();

        assert_eq!(repo.product(&product_id).unwrap().quantity, 1);

        assert_eq!(repo.sales().len(), 1);
        assert_eq!(repo.sales()[0].profit, Money::from_rupees(15_000));

        assert_eq!(repo.khata_entries().len(), 1);
        let entry = &repo.khata_entries()[0];
        assert_eq!(entry.entry_type, EntryType::Credit);
        assert_eq!(entry.amount, Money::from_rupees(85_000));
        assert_eq!(entry.customer_id, customer_id);

        let balances = repo.customer_balances();
        assert_eq!(
            balance_for(&balances, &customer_id),
            Money::from_rupees(85_000)
        );
    }
}
