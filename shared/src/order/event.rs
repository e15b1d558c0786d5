//! Cart events published on the customer display channel

use super::snapshot::CartSnapshot;
use serde::{Deserialize, Serialize};

/// What happened to the cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEventKind {
    // Cart mutations
    LineAdded,
    QuantityChanged,
    LineRemoved,
    CartCleared,

    // State transitions
    CheckoutStarted,
    CheckoutCancelled,
    SubmissionStarted,
    TransactionCompleted,
    SubmissionFailed,
    SessionReset,
}

impl std::fmt::Display for CartEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartEventKind::LineAdded => write!(f, "LINE_ADDED"),
            CartEventKind::QuantityChanged => write!(f, "QUANTITY_CHANGED"),
            CartEventKind::LineRemoved => write!(f, "LINE_REMOVED"),
            CartEventKind::CartCleared => write!(f, "CART_CLEARED"),
            CartEventKind::CheckoutStarted => write!(f, "CHECKOUT_STARTED"),
            CartEventKind::CheckoutCancelled => write!(f, "CHECKOUT_CANCELLED"),
            CartEventKind::SubmissionStarted => write!(f, "SUBMISSION_STARTED"),
            CartEventKind::TransactionCompleted => write!(f, "TRANSACTION_COMPLETED"),
            CartEventKind::SubmissionFailed => write!(f, "SUBMISSION_FAILED"),
            CartEventKind::SessionReset => write!(f, "SESSION_RESET"),
        }
    }
}

/// Broadcast envelope
///
/// Carries a complete snapshot rather than a delta; a display that joins
/// mid-session renders correctly from its first received event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartEvent {
    /// Event unique ID
    pub event_id: String,
    pub kind: CartEventKind,
    pub snapshot: CartSnapshot,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl CartEvent {
    pub fn new(kind: CartEventKind, snapshot: CartSnapshot) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            kind,
            snapshot,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
