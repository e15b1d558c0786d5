//! Product catalog collaborator
//!
//! The session validates stock against a point-in-time read on every cart
//! mutation. It only ever reads stock; the transaction gateway owns the
//! decrement after a sale is persisted. Cross-device stock reservation is
//! explicitly not attempted.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::Product;
use std::collections::HashMap;
use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog lookup failed: {0}")]
    Lookup(String),
}

/// Product lookup boundary
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Point-in-time product read; `None` when the product does not exist
    async fn product(&self, product_id: &str) -> Result<Option<Product>, CatalogError>;
}

/// In-memory catalog
///
/// Reference implementation used by tests and by the in-memory gateway,
/// which settles stock through it after a successful submission.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace products
    pub fn seed(&self, products: impl IntoIterator<Item = Product>) {
        let mut map = self.products.write();
        for product in products {
            map.insert(product.id.clone(), product);
        }
    }

    pub fn stock(&self, product_id: &str) -> Option<u32> {
        self.products.read().get(product_id).map(|p| p.stock)
    }

    /// Repricing a product must not touch lines already in a cart
    pub fn set_price(&self, product_id: &str, price: i64) {
        if let Some(product) = self.products.write().get_mut(product_id) {
            product.price = price;
        }
    }

    pub fn set_stock(&self, product_id: &str, stock: u32) {
        if let Some(product) = self.products.write().get_mut(product_id) {
            product.stock = stock;
        }
    }

    /// Clamped decrement; unknown products are ignored
    pub fn decrement_stock(&self, product_id: &str, quantity: u32) {
        if let Some(product) = self.products.write().get_mut(product_id) {
            product.stock = product.stock.saturating_sub(quantity);
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn product(&self, product_id: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.read().get(product_id).cloned())
    }
}
