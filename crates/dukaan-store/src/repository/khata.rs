//! # Customer Accounts & Ledger Operations
//!
//! Customer CRUD, the append-only khata ledger, and the cascading delete
//! that keeps the two in step.
//!
//! ## Cascade Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Customer Deletion Cascade                            │
//! │                                                                         │
//! │  delete_customer("ravi")                                                │
//! │    ├── remove Customer "ravi"                                           │
//! │    ├── remove EVERY KhataEntry with customer_id == "ravi"               │
//! │    └── commit customers + khataEntries together                         │
//! │                                                                         │
//! │  There is no public way to delete a customer without the cascade; an    │
//! │  orphaned entry would silently vanish from balance aggregation while    │
//! │  still inflating the stored entry list.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use dukaan_core::ledger::{compute_balances, portfolio_summary};
use dukaan_core::validation::{validate_amount, validate_customer_name, validate_description};
use dukaan_core::{Customer, EntryType, KhataEntry, Money, PortfolioSummary};

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, KeyValueStore};
use crate::repository::Repository;

// =============================================================================
// Input & Output Types
// =============================================================================

/// Customer intake data; the id is assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub photo: Option<String>,
}

/// A manual ledger movement; id and date are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewKhataEntry {
    pub customer_id: String,
    pub entry_type: EntryType,
    pub amount: Money,
    pub description: String,
    pub product_name: Option<String>,
    pub condition: Option<String>,
}

/// Outcome of a cascading customer deletion.
#[derive(Debug, Clone)]
pub struct CustomerPurge {
    /// The removed customer.
    pub customer: Customer,
    /// How many ledger entries were removed with them.
    pub entries_removed: usize,
}

// =============================================================================
// Customer Operations
// =============================================================================

impl<S: KeyValueStore> Repository<S> {
    /// Creates a new customer account.
    pub fn add_customer(&mut self, new: NewCustomer) -> StoreResult<Customer> {
        let name = validate_customer_name(&new.name)?;

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name,
            phone: new.phone.filter(|p| !p.trim().is_empty()),
            photo: new.photo,
        };

        self.customers.insert(0, customer.clone());
        self.commit(&[keys::CUSTOMERS])?;

        info!(id = %customer.id, name = %customer.name, "Customer added");
        Ok(customer)
    }

    /// Replaces the stored customer with a matching id verbatim.
    pub fn update_customer(&mut self, customer: Customer) -> StoreResult<()> {
        validate_customer_name(&customer.name)?;

        let slot = self
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or_else(|| StoreError::not_found("Customer", &customer.id))?;

        debug!(id = %customer.id, "Customer updated");
        *slot = customer;
        self.commit(&[keys::CUSTOMERS])?;
        Ok(())
    }

    /// Deletes a customer AND every ledger entry referencing them.
    ///
    /// One operation, one commit: the customer list and the entry list can
    /// never disagree about who exists. Irreversible; callers gate it
    /// behind confirmation.
    pub fn delete_customer(&mut self, customer_id: &str) -> StoreResult<CustomerPurge> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == customer_id)
            .ok_or_else(|| StoreError::not_found("Customer", customer_id))?;

        let customer = self.customers.remove(index);

        let before = self.entries.len();
        self.entries.retain(|entry| entry.customer_id != customer_id);
        let entries_removed = before - self.entries.len();

        self.commit(&[keys::CUSTOMERS, keys::KHATA_ENTRIES])?;

        info!(
            id = %customer.id,
            name = %customer.name,
            entries_removed,
            "Customer deleted with ledger history"
        );
        Ok(CustomerPurge {
            customer,
            entries_removed,
        })
    }

    /// Looks up a single customer by id.
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Case-insensitive substring search over customer names.
    /// An empty query matches everyone.
    pub fn search_customers(&self, query: &str) -> Vec<&Customer> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.customers.iter().collect();
        }

        self.customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Ledger Entries
    // -------------------------------------------------------------------------

    /// Records a manual ledger movement against an existing customer.
    ///
    /// The referenced customer must exist; entries are append-only from
    /// here on.
    pub fn add_khata_entry(&mut self, new: NewKhataEntry) -> StoreResult<KhataEntry> {
        validate_amount(new.amount)?;
        let description = validate_description(&new.description)?;

        if self.customer(&new.customer_id).is_none() {
            return Err(StoreError::not_found("Customer", &new.customer_id));
        }

        let entry = KhataEntry {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id,
            entry_type: new.entry_type,
            amount: new.amount,
            description,
            date: Utc::now(),
            product_name: new.product_name,
            condition: new.condition.filter(|c| !c.trim().is_empty()),
        };

        self.entries.insert(0, entry.clone());
        self.commit(&[keys::KHATA_ENTRIES])?;

        info!(
            customer_id = %entry.customer_id,
            entry_type = %entry.entry_type,
            amount = %entry.amount,
            "Ledger entry recorded"
        );
        Ok(entry)
    }

    /// Every ledger entry for one customer, most recent first.
    pub fn entries_for(&self, customer_id: &str) -> Vec<&KhataEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.customer_id == customer_id)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Balance Views
    // -------------------------------------------------------------------------
    // Thin wrappers over the pure ledger folds; nothing is cached.

    /// Per-customer signed balances recomputed from the full ledger.
    pub fn customer_balances(&self) -> HashMap<String, Money> {
        compute_balances(&self.entries)
    }

    /// Portfolio summary over every customer account.
    pub fn portfolio(&self) -> PortfolioSummary {
        portfolio_summary(&self.customers, &self.customer_balances())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use dukaan_core::balance_for;

    fn repo() -> Repository<MemoryStore> {
        Repository::open(MemoryStore::new()).unwrap()
    }

    fn new_customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone: None,
            photo: None,
        }
    }

    fn credit(customer_id: &str, rupees: i64) -> NewKhataEntry {
        NewKhataEntry {
            customer_id: customer_id.to_string(),
            entry_type: EntryType::Credit,
            amount: Money::from_rupees(rupees),
            description: "Goods on trust".to_string(),
            product_name: None,
            condition: None,
        }
    }

    fn debit(customer_id: &str, rupees: i64) -> NewKhataEntry {
        NewKhataEntry {
            entry_type: EntryType::Debit,
            description: "Payment received".to_string(),
            ..credit(customer_id, rupees)
        }
    }

    #[test]
    fn test_add_customer_trims_and_prepends() {
        let mut repo = repo();
        let ravi = repo.add_customer(new_customer("  Ravi  ")).unwrap();
        let sita = repo.add_customer(new_customer("Sita")).unwrap();

        assert_eq!(ravi.name, "Ravi");
        assert_eq!(repo.customers()[0].id, sita.id);
        assert_eq!(repo.customers()[1].id, ravi.id);
    }

    #[test]
    fn test_add_customer_requires_name() {
        let mut repo = repo();
        assert!(matches!(
            repo.add_customer(new_customer("   ")),
            Err(StoreError::Validation(_))
        ));
        assert!(repo.customers().is_empty());
    }

    #[test]
    fn test_update_customer() {
        let mut repo = repo();
        let mut ravi = repo.add_customer(new_customer("Ravi")).unwrap();

        ravi.phone = Some("9876543210".to_string());
        repo.update_customer(ravi.clone()).unwrap();
        assert_eq!(
            repo.customer(&ravi.id).unwrap().phone.as_deref(),
            Some("9876543210")
        );
    }

    #[test]
    fn test_khata_entry_requires_existing_customer() {
        let mut repo = repo();

        let result = repo.add_khata_entry(credit("no-such-customer", 500));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(repo.khata_entries().is_empty());
    }

    #[test]
    fn test_khata_entry_validation() {
        let mut repo = repo();
        let ravi = repo.add_customer(new_customer("Ravi")).unwrap();

        let result = repo.add_khata_entry(NewKhataEntry {
            amount: Money::zero(),
            ..credit(&ravi.id, 0)
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = repo.add_khata_entry(NewKhataEntry {
            description: "  ".to_string(),
            ..credit(&ravi.id, 500)
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));

        assert!(repo.khata_entries().is_empty());
    }

    #[test]
    fn test_entries_and_balances() {
        let mut repo = repo();
        let ravi = repo.add_customer(new_customer("Ravi")).unwrap();
        let sita = repo.add_customer(new_customer("Sita")).unwrap();

        repo.add_khata_entry(credit(&ravi.id, 500)).unwrap();
        repo.add_khata_entry(debit(&ravi.id, 200)).unwrap();
        repo.add_khata_entry(credit(&ravi.id, 100)).unwrap();
        repo.add_khata_entry(debit(&sita.id, 50)).unwrap();

        assert_eq!(repo.entries_for(&ravi.id).len(), 3);

        let balances = repo.customer_balances();
        assert_eq!(balance_for(&balances, &ravi.id), Money::from_rupees(400));
        assert_eq!(balance_for(&balances, &sita.id), Money::from_rupees(-50));

        let summary = repo.portfolio();
        assert_eq!(summary.total_customers, 2);
        assert_eq!(summary.customers_with_due, 1);
        assert_eq!(summary.total_receivable, Money::from_rupees(400));
    }

    #[test]
    fn test_delete_customer_cascades() {
        let mut repo = repo();
        let ravi = repo.add_customer(new_customer("Ravi")).unwrap();
        let sita = repo.add_customer(new_customer("Sita")).unwrap();

        repo.add_khata_entry(credit(&ravi.id, 500)).unwrap();
        repo.add_khata_entry(debit(&ravi.id, 200)).unwrap();
        repo.add_khata_entry(credit(&sita.id, 90)).unwrap();

        let purge = repo.delete_customer(&ravi.id).unwrap();
        assert_eq!(purge.customer.id, ravi.id);
        assert_eq!(purge.entries_removed, 2);

        // No surviving entry mentions the deleted customer, so the balance
        // fold never sees their id again.
        assert!(repo
            .khata_entries()
            .iter()
            .all(|entry| entry.customer_id != ravi.id));
        let balances = repo.customer_balances();
        assert!(!balances.contains_key(&ravi.id));
        assert_eq!(balance_for(&balances, &sita.id), Money::from_rupees(90));
    }

    #[test]
    fn test_delete_missing_customer_is_not_found() {
        let mut repo = repo();
        assert!(matches!(
            repo.delete_customer("ghost"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_search_customers() {
        let mut repo = repo();
        repo.add_customer(new_customer("Ravi Kumar")).unwrap();
        repo.add_customer(new_customer("Sita Sharma")).unwrap();

        assert_eq!(repo.search_customers("ravi").len(), 1);
        assert_eq!(repo.search_customers("SHARMA").len(), 1);
        assert_eq!(repo.search_customers("").len(), 2);
        assert!(repo.search_customers("mohan").is_empty());
    }
}
