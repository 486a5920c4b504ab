//! # Inventory Operations
//!
//! Product intake, edits, deletion, and search over the stock collection.
//!
//! ## Key Operations
//! - Add product (id and intake date assigned here, newest first)
//! - Update product (replace by id)
//! - Delete product
//! - Case-insensitive substring search across the classification fields

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use dukaan_core::validation::{validate_classification, validate_price, validate_quantity};
use dukaan_core::{Money, Product};

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, KeyValueStore};
use crate::repository::Repository;

// =============================================================================
// Input Types
// =============================================================================

/// Stock intake data; id and intake date are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category: String,
    pub brand: String,
    pub model: String,
    pub identifier: Option<String>,
    pub purchase_price: Money,
    pub selling_price: Money,
    pub quantity: i64,
    pub photo: Option<String>,
}

// =============================================================================
// Inventory Operations
// =============================================================================

impl<S: KeyValueStore> Repository<S> {
    /// Takes a new product into stock.
    ///
    /// ## Validation
    /// Category, brand, and model must be non-empty; both prices must be
    /// non-negative; quantity must be at least 1. Nothing is stored when
    /// validation fails.
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        let category = validate_classification("category", &new.category)?;
        let brand = validate_classification("brand", &new.brand)?;
        let model = validate_classification("model", &new.model)?;
        validate_price("purchasePrice", new.purchase_price)?;
        validate_price("sellingPrice", new.selling_price)?;
        validate_quantity(new.quantity)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            category,
            brand,
            model,
            identifier: new.identifier.filter(|s| !s.trim().is_empty()),
            purchase_price: new.purchase_price,
            selling_price: new.selling_price,
            date_added: Utc::now(),
            quantity: new.quantity,
            photo: new.photo,
        };

        // Newest stock first; ordering is a display convention carried
        // through to the persisted sequence.
        self.stock.insert(0, product.clone());
        self.commit(&[keys::STOCK])?;

        info!(id = %product.id, name = %product.display_name(), quantity = product.quantity, "Product added");
        Ok(product)
    }

    /// Replaces the stored product with a matching id verbatim.
    ///
    /// Callers pass the full edited product; id and intake date are carried
    /// in the value itself and are preserved by convention.
    pub fn update_product(&mut self, product: Product) -> StoreResult<()> {
        validate_classification("category", &product.category)?;
        validate_classification("brand", &product.brand)?;
        validate_classification("model", &product.model)?;
        validate_price("purchasePrice", product.purchase_price)?;
        validate_price("sellingPrice", product.selling_price)?;
        validate_quantity(product.quantity)?;

        let slot = self
            .stock
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| StoreError::not_found("Product", &product.id))?;

        debug!(id = %product.id, "Product updated");
        *slot = product;
        self.commit(&[keys::STOCK])?;
        Ok(())
    }

    /// Removes a product from stock and returns it.
    pub fn delete_product(&mut self, product_id: &str) -> StoreResult<Product> {
        let index = self
            .stock
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        let removed = self.stock.remove(index);
        self.commit(&[keys::STOCK])?;

        info!(id = %removed.id, name = %removed.display_name(), "Product deleted");
        Ok(removed)
    }

    /// Looks up a single product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.stock.iter().find(|p| p.id == product_id)
    }

    /// Case-insensitive substring search across category, brand, model,
    /// and identifier. An empty query matches everything.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.stock.iter().collect();
        }

        self.stock
            .iter()
            .filter(|p| {
                p.category.to_lowercase().contains(&query)
                    || p.brand.to_lowercase().contains(&query)
                    || p.model.to_lowercase().contains(&query)
                    || p.identifier
                        .as_deref()
                        .is_some_and(|ident| ident.to_lowercase().contains(&query))
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn iphone(quantity: i64) -> NewProduct {
        NewProduct {
            category: "Mobile".to_string(),
            brand: "Apple".to_string(),
            model: "iPhone 14".to_string(),
            identifier: None,
            purchase_price: Money::from_rupees(70_000),
            selling_price: Money::from_rupees(85_000),
            quantity,
            photo: None,
        }
    }

    fn repo() -> Repository<MemoryStore> {
        Repository::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_add_product_assigns_id_and_prepends() {
        let mut repo = repo();

        let first = repo.add_product(iphone(2)).unwrap();
        let second = repo
            .add_product(NewProduct {
                model: "iPhone 15".to_string(),
                ..iphone(1)
            })
            .unwrap();

        assert_ne!(first.id, second.id);
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());
        // Most recent intake first.
        assert_eq!(repo.products()[0].id, second.id);
        assert_eq!(repo.products()[1].id, first.id);
    }

    #[test]
    fn test_add_product_validates_before_storing() {
        let mut repo = repo();

        let result = repo.add_product(NewProduct {
            brand: "   ".to_string(),
            ..iphone(1)
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = repo.add_product(iphone(0));
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = repo.add_product(NewProduct {
            purchase_price: Money::from_rupees(-1),
            ..iphone(1)
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));

        assert!(repo.products().is_empty());
    }

    #[test]
    fn test_update_product_replaces_by_id() {
        let mut repo = repo();
        let product = repo.add_product(iphone(2)).unwrap();

        let mut edited = product.clone();
        edited.selling_price = Money::from_rupees(82_000);
        repo.update_product(edited).unwrap();

        let stored = repo.product(&product.id).unwrap();
        assert_eq!(stored.selling_price, Money::from_rupees(82_000));
        assert_eq!(stored.date_added, product.date_added);
    }

    #[test]
    fn test_update_missing_product_is_not_found() {
        let mut repo = repo();
        let mut ghost = repo.add_product(iphone(1)).unwrap();
        repo.delete_product(&ghost.id).unwrap();

        ghost.selling_price = Money::from_rupees(1);
        assert!(matches!(
            repo.update_product(ghost),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_product() {
        let mut repo = repo();
        let product = repo.add_product(iphone(1)).unwrap();

        let removed = repo.delete_product(&product.id).unwrap();
        assert_eq!(removed.id, product.id);
        assert!(repo.products().is_empty());

        assert!(matches!(
            repo.delete_product(&product.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_search_products() {
        let mut repo = repo();
        repo.add_product(iphone(2)).unwrap();
        repo.add_product(NewProduct {
            category: "Laptop".to_string(),
            brand: "Dell".to_string(),
            model: "XPS 13".to_string(),
            identifier: Some("SN-998".to_string()),
            ..iphone(1)
        })
        .unwrap();

        assert_eq!(repo.search_products("apple").len(), 1);
        assert_eq!(repo.search_products("XPS").len(), 1);
        assert_eq!(repo.search_products("sn-998").len(), 1);
        assert_eq!(repo.search_products("").len(), 2);
        assert!(repo.search_products("samsung").is_empty());
    }
}
