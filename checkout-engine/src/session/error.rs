//! Session errors

use crate::catalog::CatalogError;
use crate::gateway::GatewayError;
use shared::order::CheckoutState;
use thiserror::Error;

/// Checkout session errors
///
/// The validation variants never change session state and leave the cart
/// untouched; `Submission` is the only fatal-to-this-attempt condition and
/// lands the session in `Failed` with everything kept for retry.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("adding {requested} x {product_id} exceeds available stock ({available})")]
    StockExceeded {
        product_id: String,
        requested: u32,
        available: u32,
    },

    #[error("cannot start checkout with an empty cart")]
    EmptyCart,

    #[error("tendered amount {tendered} is less than total {total}")]
    InsufficientPayment { tendered: i64, total: i64 },

    #[error("product not found in catalog: {0}")]
    ProductNotFound(String),

    #[error("cart is locked while checkout is in progress (state {0})")]
    CheckoutActive(CheckoutState),

    #[error("{operation} is not valid in state {state}")]
    InvalidState {
        operation: &'static str,
        state: CheckoutState,
    },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("transaction submission failed: {0}")]
    Submission(#[from] GatewayError),
}

pub type SessionResult<T> = Result<T, SessionError>;
