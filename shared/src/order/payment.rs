//! Payment methods accepted at the register

use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Qris,
    Card,
}

impl PaymentMethod {
    /// Cash is the only method where the tendered amount may differ from
    /// the total; the other methods always settle exactly.
    pub fn is_cash(self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "CASH"),
            PaymentMethod::Qris => write!(f, "QRIS"),
            PaymentMethod::Card => write!(f, "CARD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Qris).unwrap(), "\"QRIS\"");
        let parsed: PaymentMethod = serde_json::from_str("\"CASH\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Cash);
    }
}
