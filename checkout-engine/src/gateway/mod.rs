//! Transaction submission collaborators
//!
//! The gateway persists a finished sale and decrements catalog stock as a
//! side effect; the session itself never writes stock. A failed submission
//! is surfaced to the cashier and retried with the exact same draft; the
//! session keeps all payment data until the gateway answers.

mod memory;
mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

use async_trait::async_trait;
use shared::models::{Transaction, TransactionDraft};
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (network, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend refused the transaction
    #[error("backend rejected transaction (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Backend reachable but not serving (or scripted test failure)
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Transaction submission boundary
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Persist the sale and settle stock; returns the stored record
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, GatewayError>;

    /// Most recent transactions for a store, newest first
    async fn recent(
        &self,
        store_id: &str,
        limit: usize,
    ) -> Result<Vec<Transaction>, GatewayError>;
}
