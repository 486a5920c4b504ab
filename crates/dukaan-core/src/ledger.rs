//! # Ledger Balance Engine
//!
//! Pure, stateless aggregation over the khata ledger and sales history.
//!
//! ## Balance Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     How a Balance is Computed                           │
//! │                                                                         │
//! │  KhataEntry history for customer "Ravi":                               │
//! │                                                                         │
//! │    credit ₹500   (goods given on trust)  ──►  +500                     │
//! │    debit  ₹200   (repayment received)    ──►  -200                     │
//! │    credit ₹100   (more goods on trust)   ──►  +100                     │
//! │                                          ────────────                   │
//! │    balance                                    ₹400  (Ravi owes shop)   │
//! │                                                                         │
//! │  balance > 0   customer owes the store                                 │
//! │  balance <= 0  customer owes nothing / has a surplus                   │
//! │                                                                         │
//! │  The fold is a plain sum: commutative and associative, so entry        │
//! │  order never changes the result.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No balance is ever persisted or cached; callers recompute from the full
//! entry collection whenever a balance is needed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Customer, KhataEntry, SaleRecord};

// =============================================================================
// Balance Fold
// =============================================================================

/// Folds the full entry collection into a per-customer signed balance.
///
/// Every customer id seen in the entries starts at zero; credits add,
/// debits subtract. Entry order does not affect the result.
pub fn compute_balances(entries: &[KhataEntry]) -> HashMap<String, Money> {
    let mut balances: HashMap<String, Money> = HashMap::new();

    for entry in entries {
        let balance = balances.entry(entry.customer_id.clone()).or_default();
        *balance += entry.signed_amount();
    }

    balances
}

/// Balance for one customer, zero when the customer has no entries.
pub fn balance_for(balances: &HashMap<String, Money>, customer_id: &str) -> Money {
    balances.get(customer_id).copied().unwrap_or_default()
}

// =============================================================================
// Portfolio Summary
// =============================================================================

/// Portfolio-level view over every customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Total number of customer accounts.
    pub total_customers: usize,

    /// How many listed customers currently owe the store (balance > 0).
    pub customers_with_due: usize,

    /// Sum of all positive balances. Zero and negative balances are
    /// excluded entirely, not subtracted.
    pub total_receivable: Money,
}

/// Aggregates customer balances into the portfolio summary.
pub fn portfolio_summary(
    customers: &[Customer],
    balances: &HashMap<String, Money>,
) -> PortfolioSummary {
    let customers_with_due = customers
        .iter()
        .filter(|c| balance_for(balances, &c.id).is_positive())
        .count();

    let total_receivable = balances
        .values()
        .filter(|balance| balance.is_positive())
        .copied()
        .sum();

    PortfolioSummary {
        total_customers: customers.len(),
        customers_with_due,
        total_receivable,
    }
}

// =============================================================================
// Profit Totals
// =============================================================================

/// Totals over the full sales history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTotals {
    /// Sum of snapshot selling prices.
    pub total_revenue: Money,

    /// Sum of snapshot purchase prices.
    pub total_cost: Money,

    /// Sum of the per-sale profits frozen at sale time.
    pub total_profit: Money,
}

/// Folds the sales history into revenue/cost/profit totals.
///
/// Uses the frozen snapshot prices, so later edits to live products never
/// shift historical figures.
pub fn profit_totals(sales: &[SaleRecord]) -> ProfitTotals {
    sales.iter().fold(ProfitTotals::default(), |mut acc, sale| {
        acc.total_revenue += sale.product.selling_price;
        acc.total_cost += sale.product.purchase_price;
        acc.total_profit += sale.profit;
        acc
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
