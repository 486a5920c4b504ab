//! # Store Error Types
//!
//! Error types for persistence and repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key / entity context              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (in the CLI) ← Rendered for the user                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dukaan_core::ValidationError;
use thiserror::Error;

/// Persistence and repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the repository.
    ///
    /// ## When This Occurs
    /// - Selling, updating, or deleting a product id that no longer exists
    /// - Recording a ledger entry against an unknown customer
    ///
    /// Lookup misses are surfaced, never swallowed: a caller can always
    /// tell "sale succeeded" from "product vanished before the sale".
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input validation failed before any entity was created.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing a store file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a collection to JSON failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document exists but does not parse as the expected shape.
    ///
    /// ## When This Occurs
    /// - A store file was hand-edited or truncated outside the app
    /// - A backup from an incompatible version was copied into the data dir
    #[error("Stored data for key '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Corrupt error for a given store key.
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Product", "p-123");
        assert_eq!(err.to_string(), "Product not found: p-123");

        let err = StoreError::corrupt("stock", "expected an array");
        assert_eq!(
            err.to_string(),
            "Stored data for key 'stock' is corrupt: expected an array"
        );
    }

    #[test]
    fn test_validation_converts_to_store_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let err: StoreError = validation_err.into();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
