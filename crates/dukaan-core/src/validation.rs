//! # Validation Module
//!
//! Input validation for user-entered data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing                                         │
//! │  ├── Type checks (numbers parse, flags exist)                          │
//! │  └── Immediate feedback before anything runs                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, ranges, positivity                               │
//! │  └── Runs before any entity is created                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository invariants                                        │
//! │  ├── Referenced customer must exist                                    │
//! │  └── Zero-quantity products are removed, never stored                  │
//! │                                                                         │
//! │  A validation failure is surfaced to the caller and nothing is         │
//! │  partially applied.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PRODUCT_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a classification field (category, brand, or model).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_classification(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(value.to_string())
}

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a ledger entry description.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_description(description: &str) -> ValidationResult<String> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 200,
        });
    }

    Ok(description.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be at least 1 (a product with zero units is removed, not stored)
/// - Must not exceed MAX_PRODUCT_QUANTITY
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_PRODUCT_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_PRODUCT_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for giveaways)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a ledger entry amount.
///
/// ## Rules
/// - Must be strictly positive; the direction comes from the entry type,
///   never from the sign of the amount
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_classification() {
        assert_eq!(
            validate_classification("brand", "  Apple  ").unwrap(),
            "Apple"
        );
        assert!(validate_classification("category", "").is_err());
        assert!(validate_classification("category", "   ").is_err());
        assert!(validate_classification("model", &"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("Ravi").unwrap(), "Ravi");
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name(&"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Payment received").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9_999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("sellingPrice", Money::from_rupees(85_000)).is_ok());
        assert!(validate_price("sellingPrice", Money::zero()).is_ok());
        assert!(validate_price("purchasePrice", Money::from_rupees(-1)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::from_rupees(500)).is_ok());
        assert!(validate_amount(Money::zero()).is_err());
        assert!(validate_amount(Money::from_rupees(-500)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
