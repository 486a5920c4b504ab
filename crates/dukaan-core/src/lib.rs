//! # dukaan-core: Pure Business Logic for Dukaan
//!
//! This crate is the **heart** of Dukaan, a small retail-shop management
//! tool: stock tracking, sales and profit records, and a running customer
//! credit ledger (khata). It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/dukaan-cli                              │   │
//! │  │    stock add ──► sell cash ──► khata statement ──► backup      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dukaan-store                                 │   │
//! │  │    Repository, sale transaction engine, JSON key-value store   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ balances  │  │   rules   │  │   │
//! │  │   │ KhataEntry│  │  (paise)  │  │ portfolio │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO CLOCK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SaleRecord, Customer, KhataEntry, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - Balance fold, portfolio summary, profit totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and clock access are FORBIDDEN here; timestamps
//!    are always passed in by the caller
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dukaan_core::ledger::{compute_balances, balance_for};
//! use dukaan_core::money::Money;
//! use dukaan_core::types::{EntryType, KhataEntry};
//!
//! let entries = vec![
//!     KhataEntry {
//!         id: "e-1".into(),
//!         customer_id: "ravi".into(),
//!         entry_type: EntryType::Credit,
//!         amount: Money::from_rupees(500),
//!         description: "Sold: Apple iPhone 14".into(),
//!         date: chrono::Utc::now(),
//!         product_name: None,
//!         condition: None,
//!     },
//! ];
//!
//! let balances = compute_balances(&entries);
//! assert_eq!(balance_for(&balances, "ravi"), Money::from_rupees(500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::Money` instead of
// `use dukaan_core::money::Money`

pub use error::ValidationError;
pub use ledger::{balance_for, compute_balances, portfolio_summary, profit_totals};
pub use ledger::{PortfolioSummary, ProfitTotals};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a single product row can hold.
///
/// Prevents accidental over-entry (e.g., typing 10000 instead of 10) at
/// stock intake. A shop with more units of one item than this wants a real
/// warehouse system.
pub const MAX_PRODUCT_QUANTITY: i64 = 9_999;
