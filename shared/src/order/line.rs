//! Cart line - one product's presence in the active order

use serde::{Deserialize, Serialize};

/// Cart line
///
/// `name` and `unit_price` are copied from the catalog when the line is
/// first added; later catalog edits do not touch existing lines. The cart
/// holds at most one line per `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    /// Unit price in whole rupiah, snapshotted at add time
    pub unit_price: i64,
    /// Always >= 1; a line reduced to zero is removed, never kept
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product_id: "prod-1".to_string(),
            name: "Es Kopi Susu".to_string(),
            unit_price: 22000,
            quantity: 3,
        };
        assert_eq!(line.line_total(), 66000);
    }
}
