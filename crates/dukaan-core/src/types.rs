//! # Domain Types
//!
//! Core domain types used throughout Dukaan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SaleRecord    │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  category       │   │  product (snap) │   │  name           │       │
//! │  │  brand/model    │   │  date_sold      │   │  phone?         │       │
//! │  │  quantity       │   │  profit         │   │  photo?         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   KhataEntry    │   │   EntryType     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  customer_id FK │   │  Credit (owes+) │                             │
//! │  │  amount         │   │  Debit  (owes-) │                             │
//! │  │  description    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleRecord` embeds a full copy of the `Product` as it was at sale time,
//! with quantity fixed at 1 (one unit sold). Later edits to the live product
//! never touch the receipt: profit is computed once and stored.
//!
//! All types serialize with camelCase field names; that is the layout the
//! persisted JSON documents and backup export use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping unit.
///
/// ## Invariant
/// A product with `quantity <= 0` must never exist in the repository; the
/// sale engine removes the product instead of storing a zero quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Free-text classification: "Mobile", "Laptop", "Accessory", ...
    pub category: String,

    /// Manufacturer name shown in lists and receipts.
    pub brand: String,

    /// Model name; `"{brand} {model}"` is the display name.
    pub model: String,

    /// Optional serial/IMEI/SKU. Not guaranteed unique across stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// What the shop paid per unit.
    pub purchase_price: Money,

    /// What the shop charges per unit.
    pub selling_price: Money,

    /// When the product was taken into stock.
    pub date_added: DateTime<Utc>,

    /// Units currently in stock (>= 1 while the product exists).
    pub quantity: i64,

    /// Optional photo reference (path or data URI).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Product {
    /// Display name shown on receipts and ledger entries.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Copy of this product representing a single sold unit.
    ///
    /// Quantity is forced to 1; prices are carried over unchanged and are
    /// frozen from this point on.
    pub fn unit_snapshot(&self) -> Product {
        Product {
            quantity: 1,
            ..self.clone()
        }
    }

    /// Profit made on one unit at current prices.
    #[inline]
    pub fn unit_profit(&self) -> Money {
        self.selling_price - self.purchase_price
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// An immutable receipt of one unit sold.
///
/// Created exactly once per unit sold (cash or credit); never mutated or
/// deleted by normal operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Snapshot of the product at sale time, quantity fixed at 1.
    pub product: Product,

    /// When the unit was sold.
    pub date_sold: DateTime<Utc>,

    /// selling_price - purchase_price, evaluated at sale time and stored.
    /// Never recomputed, even if the live product is edited or deleted.
    pub profit: Money,
}

impl SaleRecord {
    /// Builds the receipt for one unit of `product` sold at `date_sold`.
    pub fn for_unit(id: String, product: &Product, date_sold: DateTime<Utc>) -> Self {
        SaleRecord {
            id,
            product: product.unit_snapshot(),
            date_sold,
            profit: product.unit_profit(),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A ledger account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer name (required, non-empty).
    pub name: String,

    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional photo reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

// =============================================================================
// Khata Entry
// =============================================================================

/// Direction of a ledger movement.
///
/// This is the shop's sign convention, not accounting debit/credit:
/// credit means the shop extended goods or money on trust (customer owes
/// more), debit means the customer paid back (customer owes less).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Udhaar diya: the customer's owed balance goes up.
    Credit,
    /// Paisa liya: the customer's owed balance goes down.
    Debit,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Credit => write!(f, "credit"),
            EntryType::Debit => write!(f, "debit"),
        }
    }
}

/// One ledger movement against a customer account.
///
/// Entries are append-only: never mutated, never individually deleted.
/// The only way an entry disappears is the cascading customer deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KhataEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The customer this movement belongs to. Must reference an existing
    /// customer at creation time; relation is by id lookup only.
    pub customer_id: String,

    /// Movement direction (see [`EntryType`]).
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Movement amount (always positive; direction comes from entry_type).
    pub amount: Money,

    /// Required free-text description, e.g. "Sold: Apple iPhone 14".
    pub description: String,

    /// When the entry was recorded.
    pub date: DateTime<Utc>,

    /// Product display name when the entry originates from a credit sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Optional free-text condition, e.g. "Pay by end of month".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl KhataEntry {
    /// The signed effect of this entry on the customer's owed balance.
    #[inline]
    pub fn signed_amount(&self) -> Money {
        match self.entry_type {
            EntryType::Credit => self.amount,
            EntryType::Debit => Money::zero() - self.amount,
        }
    }
}

// =============================================================================
// App Settings
// =============================================================================

/// Singleton store-owner preferences.
///
/// Exactly one instance exists, created with defaults on first run and
/// mutated in place thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Owner display name shown in the header.
    pub owner_name: String,

    /// Optional owner photo reference.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_photo: String,

    /// Owner contact email.
    #[serde(default)]
    pub owner_email: String,

    /// Owner contact phone.
    #[serde(default)]
    pub owner_phone: String,

    /// User-facing label for credit entries.
    pub credit_label: String,

    /// User-facing label for debit entries.
    pub debit_label: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            owner_name: "Store Owner".to_string(),
            owner_photo: String::new(),
            owner_email: String::new(),
            owner_phone: String::new(),
            credit_label: "Udhaar Diya (Credit)".to_string(),
            debit_label: "Paisa Liya (Debit)".to_string(),
        }
    }
}

impl AppSettings {
    /// The label configured for the given entry type.
    pub fn label_for(&self, entry_type: EntryType) -> &str {
        match entry_type {
            EntryType::Credit => &self.credit_label,
            EntryType::Debit => &self.debit_label,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
