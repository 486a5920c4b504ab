//! # dukaan-store: Persistence Layer for Dukaan
//!
//! This crate provides persistence for the Dukaan shop manager. State lives
//! in a synchronous string-keyed store of JSON documents; the repository
//! loads every collection on open and writes through on every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan Data Flow                                 │
//! │                                                                         │
//! │  CLI command (sell credit ...)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dukaan-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │  Repository   │    │  Operations  │  │   │
//! │  │   │   (kv.rs)     │    │ (collections) │    │ stock/khata/ │  │   │
//! │  │   │               │◄───│ write-through │◄───│    sale      │  │   │
//! │  │   │ JsonFileStore │    │  single       │    │              │  │   │
//! │  │   │ MemoryStore   │    │  commit point │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   Data directory: stock.json, sales.json, customers.json,      │   │
//! │  │   khataEntries.json, app-settings.json, app-pin.json           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The store capability trait and its two implementations
//! - [`error`] - Store error types
//! - [`repository`] - The repository and its operation modules
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukaan_store::{JsonFileStore, Repository};
//!
//! let store = JsonFileStore::open("~/.local/share/dukaan")?;
//! let mut repo = Repository::open(store)?;
//!
//! let outcome = repo.sell_on_credit(&product_id, &customer_id, None)?;
//! println!("{} now owes {}", customer_id, outcome.entry.amount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{keys, JsonFileStore, KeyValueStore, MemoryStore};
pub use repository::Repository;

// Operation input/output types for convenience
pub use repository::khata::{CustomerPurge, NewCustomer, NewKhataEntry};
pub use repository::sale::CreditSale;
pub use repository::stock::NewProduct;
