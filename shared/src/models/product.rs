//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    /// Store reference (String ID)
    pub store_id: String,
    pub name: String,
    /// Unit price in whole rupiah
    pub price: i64,
    pub category: Option<String>,
    /// Units on hand
    pub stock: u32,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<i64>,
}

impl Product {
    /// Minimal constructor for seeding and tests
    pub fn new(
        id: impl Into<String>,
        store_id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            store_id: store_id.into(),
            name: name.into(),
            price,
            category: None,
            stock,
            barcode: None,
            image_url: None,
            created_at: None,
        }
    }
}
