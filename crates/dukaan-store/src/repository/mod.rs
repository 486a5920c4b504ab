//! # Repository Module
//!
//! The entity repository: in-memory collections backed 1:1 by store keys.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Data Flow                                 │
//! │                                                                         │
//! │  open(store)                                                            │
//! │    ├── load "stock"        → Vec<Product>                              │
//! │    ├── load "sales"        → Vec<SaleRecord>                           │
//! │    ├── load "customers"    → Vec<Customer>                             │
//! │    ├── load "khataEntries" → Vec<KhataEntry>                           │
//! │    ├── load "app-settings" → AppSettings (defaults on first run)       │
//! │    └── load "app-pin"      → Option<String>                            │
//! │                                                                         │
//! │  every mutating operation:                                             │
//! │    1. validate                                                          │
//! │    2. apply all changes to the in-memory collections                   │
//! │    3. commit(): write every affected key back, then return             │
//! │                                                                         │
//! │  Multi-collection operations (credit sale, cascade delete) have ONE    │
//! │  commit point, after all collections are updated, so no caller ever    │
//! │  observes a half-applied transaction.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Modules
//!
//! - [`stock`] - Inventory operations (add/update/delete/search products)
//! - [`khata`] - Customer accounts and ledger entries, cascade delete
//! - [`sale`] - The sale transaction engine (cash and credit)

pub mod khata;
pub mod sale;
pub mod stock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use dukaan_core::{AppSettings, Customer, KhataEntry, Product, SaleRecord};

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, KeyValueStore};

// =============================================================================
// Repository
// =============================================================================

/// In-memory collections of every entity, loaded from a [`KeyValueStore`]
/// on open and written through on every mutation.
///
/// There is exactly one logical writer (the interactive user), so the
/// repository takes `&mut self` for mutations and no locking is involved.
///
/// ## Usage
/// ```rust,ignore
/// let store = JsonFileStore::open(data_dir)?;
/// let mut repo = Repository::open(store)?;
///
/// let sale = repo.sell_cash(&product_id)?;
/// println!("profit {}", sale.profit);
/// ```
#[derive(Debug)]
pub struct Repository<S: KeyValueStore> {
    store: S,
    stock: Vec<Product>,
    sales: Vec<SaleRecord>,
    customers: Vec<Customer>,
    entries: Vec<KhataEntry>,
    settings: AppSettings,
    pin: Option<String>,
}

impl<S: KeyValueStore> Repository<S> {
    /// Opens the repository, loading every collection from the store.
    ///
    /// Keys that were never written load as empty collections; settings
    /// default on first run. A key that exists but does not parse as its
    /// expected shape is a [`StoreError::Corrupt`], not silent data loss.
    pub fn open(store: S) -> StoreResult<Self> {
        let stock: Vec<Product> = load_or_default(&store, keys::STOCK)?;
        let sales: Vec<SaleRecord> = load_or_default(&store, keys::SALES)?;
        let customers: Vec<Customer> = load_or_default(&store, keys::CUSTOMERS)?;
        let entries: Vec<KhataEntry> = load_or_default(&store, keys::KHATA_ENTRIES)?;
        let settings: AppSettings = match store.load(keys::APP_SETTINGS)? {
            Some(value) => decode(keys::APP_SETTINGS, value)?,
            None => AppSettings::default(),
        };
        let pin: Option<String> = match store.load(keys::APP_PIN)? {
            Some(value) => Some(decode(keys::APP_PIN, value)?),
            None => None,
        };

        debug!(
            products = stock.len(),
            sales = sales.len(),
            customers = customers.len(),
            entries = entries.len(),
            "Repository opened"
        );

        Ok(Repository {
            store,
            stock,
            sales,
            customers,
            entries,
            settings,
            pin,
        })
    }

    // -------------------------------------------------------------------------
    // Read Accessors
    // -------------------------------------------------------------------------

    /// All products, most recently added first.
    pub fn products(&self) -> &[Product] {
        &self.stock
    }

    /// All sale records, in chronological order.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// All customers, most recently added first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// All ledger entries, most recently recorded first.
    pub fn khata_entries(&self) -> &[KhataEntry] {
        &self.entries
    }

    /// Current owner preferences.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Replaces the settings singleton and writes it through.
    pub fn update_settings(&mut self, settings: AppSettings) -> StoreResult<()> {
        self.settings = settings;
        self.commit(&[keys::APP_SETTINGS])?;
        info!("Settings updated");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // PIN Credential
    // -------------------------------------------------------------------------
    // The lock flow itself lives outside this crate; the repository only
    // stores the credential under the "app-pin" key.

    /// The stored PIN, if one has been set.
    pub fn pin(&self) -> Option<&str> {
        self.pin.as_deref()
    }

    /// Stores a PIN credential verbatim.
    pub fn set_pin(&mut self, pin: String) -> StoreResult<()> {
        self.pin = Some(pin);
        self.commit(&[keys::APP_PIN])?;
        info!("PIN set");
        Ok(())
    }

    /// Removes the stored PIN credential.
    pub fn clear_pin(&mut self) -> StoreResult<()> {
        self.pin = None;
        self.commit(&[keys::APP_PIN])?;
        info!("PIN cleared");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Backup & Reset
    // -------------------------------------------------------------------------

    /// Exports every collection and the settings as one pretty-printed JSON
    /// document, suitable for hand inspection and manual restore.
    ///
    /// The PIN credential is deliberately not part of the backup.
    pub fn export_backup(&self) -> StoreResult<String> {
        let document = BackupDocument {
            stock: &self.stock,
            sales: &self.sales,
            customers: &self.customers,
            khata_entries: &self.entries,
            settings: &self.settings,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Clears every store key and reinitializes empty/default state.
    ///
    /// Irreversible. Callers are expected to gate this behind explicit
    /// confirmation; the repository itself does not prompt.
    pub fn reset(&mut self) -> StoreResult<()> {
        for key in keys::ALL {
            self.store.remove(key)?;
        }

        self.stock.clear();
        self.sales.clear();
        self.customers.clear();
        self.entries.clear();
        self.settings = AppSettings::default();
        self.pin = None;

        info!("All data cleared");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Write-Through
    // -------------------------------------------------------------------------

    /// Writes the given keys back to the store.
    ///
    /// Called exactly once per mutating operation, after every in-memory
    /// change for that operation has been applied. This is the single
    /// commit point for multi-collection transactions.
    pub(crate) fn commit(&mut self, affected: &[&str]) -> StoreResult<()> {
        for &key in affected {
            match key {
                keys::STOCK => save(&mut self.store, key, &self.stock)?,
                keys::SALES => save(&mut self.store, key, &self.sales)?,
                keys::CUSTOMERS => save(&mut self.store, key, &self.customers)?,
                keys::KHATA_ENTRIES => save(&mut self.store, key, &self.entries)?,
                keys::APP_SETTINGS => save(&mut self.store, key, &self.settings)?,
                keys::APP_PIN => match &self.pin {
                    Some(pin) => save(&mut self.store, key, pin)?,
                    None => self.store.remove(key)?,
                },
                other => unreachable!("unknown store key: {other}"),
            }
        }
        Ok(())
    }
}

// =============================================================================
// Backup Document
// =============================================================================

/// Shape of the backup export: the five user-visible keys, camelCase.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDocument<'a> {
    stock: &'a [Product],
    sales: &'a [SaleRecord],
    customers: &'a [Customer],
    khata_entries: &'a [KhataEntry],
    settings: &'a AppSettings,
}

// =============================================================================
// Load / Save Helpers
// =============================================================================

fn load_or_default<S: KeyValueStore, T: DeserializeOwned + Default>(
    store: &S,
    key: &str,
) -> StoreResult<T> {
    match store.load(key)? {
        Some(value) => decode(key, value),
        None => Ok(T::default()),
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|err| StoreError::corrupt(key, err.to_string()))
}

fn save<S: KeyValueStore, T: Serialize>(store: &mut S, key: &str, data: &T) -> StoreResult<()> {
    let value = serde_json::to_value(data)?;
    store.save(key, &value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};

    #[test]
    fn test_open_empty_store_gives_defaults() {
        let repo = Repository::open(MemoryStore::new()).unwrap();

        assert!(repo.products().is_empty());
        assert!(repo.sales().is_empty());
        assert!(repo.customers().is_empty());
        assert!(repo.khata_entries().is_empty());
        assert_eq!(repo.settings().owner_name, "Store Owner");
        assert!(repo.pin().is_none());
    }

    #[test]
    fn test_settings_write_through_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileStore::open(dir.path()).unwrap();
            let mut repo = Repository::open(store).unwrap();

            let mut settings = repo.settings().clone();
            settings.owner_name = "Vishwakarma".to_string();
            settings.owner_phone = "9876543210".to_string();
            repo.update_settings(settings).unwrap();
        }

        let store = JsonFileStore::open(dir.path()).unwrap();
        let repo = Repository::open(store).unwrap();
        assert_eq!(repo.settings().owner_name, "Vishwakarma");
        assert_eq!(repo.settings().owner_phone, "9876543210");
    }

    #[test]
    fn test_pin_set_and_clear() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileStore::open(dir.path()).unwrap();
            let mut repo = Repository::open(store).unwrap();
            repo.set_pin("1234".to_string()).unwrap();
            assert_eq!(repo.pin(), Some("1234"));
        }

        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut repo = Repository::open(store).unwrap();
        assert_eq!(repo.pin(), Some("1234"));

        repo.clear_pin().unwrap();
        assert!(repo.pin().is_none());
        assert!(!dir.path().join("app-pin.json").exists());
    }

    #[test]
    fn test_backup_document_shape() {
        let mut repo = Repository::open(MemoryStore::new()).unwrap();
        repo.add_customer(khata::NewCustomer {
            name: "Ravi".to_string(),
            phone: None,
            photo: None,
        })
        .unwrap();

        let backup = repo.export_backup().unwrap();
        let json: serde_json::Value = serde_json::from_str(&backup).unwrap();

        assert!(json.get("stock").unwrap().is_array());
        assert!(json.get("sales").unwrap().is_array());
        assert!(json.get("customers").unwrap().is_array());
        assert!(json.get("khataEntries").unwrap().is_array());
        assert!(json.get("settings").unwrap().is_object());
        // The credential never leaves the store.
        assert!(json.get("appPin").is_none());
        assert!(json.get("app-pin").is_none());

        assert_eq!(json["customers"][0]["name"], "Ravi");
    }

    #[test]
    fn test_reset_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut repo = Repository::open(store).unwrap();

        repo.add_customer(khata::NewCustomer {
            name: "Ravi".to_string(),
            phone: None,
            photo: None,
        })
        .unwrap();
        repo.set_pin("1234".to_string()).unwrap();
        repo.reset().unwrap();

        assert!(repo.customers().is_empty());
        assert!(repo.pin().is_none());
        assert_eq!(repo.settings().owner_name, "Store Owner");
        assert!(!dir.path().join("customers.json").exists());
        assert!(!dir.path().join("app-pin.json").exists());

        // A fresh open over the same directory starts from first-run state.
        let store = JsonFileStore::open(dir.path()).unwrap();
        let repo = Repository::open(store).unwrap();
        assert!(repo.customers().is_empty());
    }
}
