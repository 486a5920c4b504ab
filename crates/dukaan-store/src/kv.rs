//! # Key-Value Store
//!
//! The persistence capability the repository is built on.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Key-Value Storage Model                              │
//! │                                                                         │
//! │  Logical key        File on disk          Shape                        │
//! │  ───────────        ────────────          ─────                        │
//! │  stock          ──► stock.json            array of Product             │
//! │  sales          ──► sales.json            array of SaleRecord          │
//! │  customers      ──► customers.json        array of Customer            │
//! │  khataEntries   ──► khataEntries.json     array of KhataEntry          │
//! │  app-settings   ──► app-settings.json     AppSettings object           │
//! │  app-pin        ──► app-pin.json          string                       │
//! │                                                                         │
//! │  load(key): full synchronous read, None if the key was never written   │
//! │  save(key): full synchronous write-through                             │
//! │                                                                         │
//! │  Writes go to <key>.json.tmp first and are renamed into place, so a    │
//! │  crash mid-write never leaves a torn file behind.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two implementations: [`JsonFileStore`] for the real data directory and
//! [`MemoryStore`] as the in-memory fake used by tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Store Keys
// =============================================================================

/// Logical key names for the persisted state.
pub mod keys {
    /// Ordered sequence of Product.
    pub const STOCK: &str = "stock";
    /// Ordered sequence of SaleRecord.
    pub const SALES: &str = "sales";
    /// Ordered sequence of Customer.
    pub const CUSTOMERS: &str = "customers";
    /// Ordered sequence of KhataEntry.
    pub const KHATA_ENTRIES: &str = "khataEntries";
    /// Single AppSettings record.
    pub const APP_SETTINGS: &str = "app-settings";
    /// Optional PIN credential for the external lock collaborator.
    pub const APP_PIN: &str = "app-pin";

    /// Every key the application owns; reset clears exactly these.
    pub const ALL: [&str; 6] = [STOCK, SALES, CUSTOMERS, KHATA_ENTRIES, APP_SETTINGS, APP_PIN];
}

// =============================================================================
// Capability Trait
// =============================================================================

/// A synchronous string-keyed store of JSON values.
///
/// The repository depends only on this trait, so the engines can be unit
/// tested against [`MemoryStore`] with no file system involved.
pub trait KeyValueStore {
    /// Loads the value stored under `key`, or `None` if never written.
    fn load(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()>;

    /// Removes `key` entirely. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// File-backed store: one pretty-printed `<key>.json` per key in a single
/// data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened JSON file store");
        Ok(JsonFileStore { dir })
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let value = serde_json::from_str(&text)?;
        Ok(Some(value))
    }

    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        // Write the new document to a sibling temp file, then rename it
        // into place. Rename within one directory is atomic, so readers
        // only ever see the old document or the new one.
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;

        debug!(key = %key, "Saved store key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store used as the test fake.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
