//! Receipt summary emitted when a checkout completes
//!
//! Format and delivery are the sink's concern; the session only hands over
//! the figures.

use crate::money::format_rupiah;
use serde::{Deserialize, Serialize};
use shared::order::PaymentMethod;

/// Summary of a completed sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// Persisted transaction ID from the gateway
    pub transaction_id: String,
    pub total: i64,
    pub payment_method: PaymentMethod,
    /// Zero for non-cash methods
    pub change_amount: i64,
}

/// Delivery boundary for completed-sale summaries
pub trait ReceiptSink: Send + Sync {
    fn deliver(&self, summary: &ReceiptSummary);
}

/// Sink that renders the summary into the log stream
#[derive(Debug, Default)]
pub struct LogReceiptSink;

impl ReceiptSink for LogReceiptSink {
    fn deliver(&self, summary: &ReceiptSummary) {
        tracing::info!(
            transaction_id = %summary.transaction_id,
            total = %format_rupiah(summary.total),
            method = %summary.payment_method,
            change = %format_rupiah(summary.change_amount),
            "receipt"
        );
    }
}
