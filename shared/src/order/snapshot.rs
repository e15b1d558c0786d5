//! Cart snapshot - complete cart state mirrored to the customer display

use super::line::CartLine;
use serde::{Deserialize, Serialize};

/// Checkout state machine position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutState {
    /// Cart is open for mutation
    #[default]
    Building,
    /// Totals are frozen, payment method/tender being chosen
    AwaitingPayment,
    /// Submission in flight; cart is locked
    Processing,
    /// Transaction persisted, waiting for acknowledgement
    Completed,
    /// Submission failed; cart and payment data kept for retry
    Failed,
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutState::Building => write!(f, "BUILDING"),
            CheckoutState::AwaitingPayment => write!(f, "AWAITING_PAYMENT"),
            CheckoutState::Processing => write!(f, "PROCESSING"),
            CheckoutState::Completed => write!(f, "COMPLETED"),
            CheckoutState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Complete cart state at one point in time
///
/// Every published snapshot is self-contained so display subscribers never
/// need to replay deltas after a missed event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSnapshot {
    pub state: CheckoutState,
    /// Insertion order = display order
    pub lines: Vec<CartLine>,
    /// Exact integer sum of line totals
    pub subtotal: i64,
    /// Half-up rounded tax on the subtotal
    pub tax: i64,
    pub total: i64,
    /// Total units across all lines
    pub item_count: u32,
}

impl CartSnapshot {
    /// Empty cart in the initial state
    pub fn empty() -> Self {
        Self {
            state: CheckoutState::Building,
            lines: Vec::new(),
            subtotal: 0,
            tax: 0,
            total: 0,
            item_count: 0,
        }
    }
}
