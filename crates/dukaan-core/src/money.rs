//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A khata balance is a running sum over years of entries. Accumulated    │
//! │  float error in a running sum means a customer's balance drifts.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹85,000 is stored as 8_500_000 paise (i64)                          │
//! │    Addition and subtraction are exact, always                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::money::Money;
//!
//! // Create from rupees (whole-rupee amounts, the common case)
//! let price = Money::from_rupees(85_000);
//!
//! // Arithmetic operations
//! let profit = price - Money::from_rupees(70_000);
//! assert_eq!(profit, Money::from_rupees(15_000));
//!
//! // Display uses Indian digit grouping
//! assert_eq!(price.to_string(), "₹85,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for ledger surpluses
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.purchase_price ──┬──► SaleRecord.profit (frozen at sale time)
/// Product.selling_price  ──┘
///
/// KhataEntry.amount ──► compute_balances ──► PortfolioSummary.total_receivable
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let price = Money::from_rupees(500);
    /// assert_eq!(price.paise(), 50_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with Indian digit grouping.
///
/// The Indian numbering system groups the last three digits, then pairs:
/// 85000 → "₹85,000", 8500000 → "₹85,00,000" (85 lakh).
/// Paise are shown only when non-zero: "₹12.50".
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let grouped = group_indian(self.rupees().unsigned_abs());

        if self.paise_part() == 0 {
            write!(f, "{}₹{}", sign, grouped)
        } else {
            write!(f, "{}₹{}.{:02}", sign, grouped, self.paise_part())
        }
    }
}

/// Formats an unsigned value with Indian digit grouping (en-IN locale).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    // Last three digits form one group; the rest split into pairs.
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut i = head.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(&head[start..i]);
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators (used by the ledger and profit folds).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees_and_paise() {
        let money = Money::from_rupees(85_000);
        assert_eq!(money.paise(), 8_500_000);
        assert_eq!(money.rupees(), 85_000);
        assert_eq!(money.paise_part(), 0);

        let with_paise = Money::from_paise(1250);
        assert_eq!(with_paise.rupees(), 12);
        assert_eq!(with_paise.paise_part(), 50);
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_rupees(0).to_string(), "₹0");
        assert_eq!(Money::from_rupees(500).to_string(), "₹500");
        assert_eq!(Money::from_rupees(85_000).to_string(), "₹85,000");
        assert_eq!(Money::from_rupees(100_000).to_string(), "₹1,00,000");
        assert_eq!(Money::from_rupees(12_345_678).to_string(), "₹1,23,45,678");
        assert_eq!(Money::from_rupees(-550).to_string(), "-₹550");
        assert_eq!(Money::from_paise(1250).to_string(), "₹12.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(400);

        assert_eq!(a + b, Money::from_rupees(1400));
        assert_eq!(a - b, Money::from_rupees(600));
        assert_eq!(b - a, Money::from_rupees(-600));
        assert_eq!(a * 3, Money::from_rupees(3000));
    }

    #[test]
    fn test_sum() {
        let entries = [
            Money::from_rupees(500),
            Money::from_rupees(-200),
            Money::from_rupees(100),
        ];
        let total: Money = entries.into_iter().sum();
        assert_eq!(total, Money::from_rupees(400));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_rupees(100);
        assert!(positive.is_positive());

        let negative = Money::from_rupees(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), positive);
    }

    #[test]
    fn test_serde_transparent() {
        // Money serializes as a bare number so the stored JSON stays flat.
        let money = Money::from_paise(8_500_000);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "8500000");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
