//! Transaction records produced by the checkout engine
//!
//! `TransactionDraft` is the payload the engine hands to the transaction
//! gateway; `Transaction` is the persisted row the gateway hands back.

use crate::order::PaymentMethod;
use serde::{Deserialize, Serialize};

/// One sold line inside a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionItem {
    pub product_id: String,
    /// Name snapshot at sale time
    pub name: String,
    /// Unit price snapshot at sale time, whole rupiah
    pub unit_price: i64,
    pub quantity: u32,
}

/// Transaction status as stored by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
}

/// Payload submitted to the transaction gateway
///
/// Everything here is a snapshot taken at confirmation time; the gateway
/// persists it verbatim and decrements catalog stock as a side effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionDraft {
    pub store_id: String,
    pub cashier_id: String,
    pub items: Vec<TransactionItem>,
    pub subtotal: i64,
    pub tax: i64,
    /// Always zero today; carried so the stored row matches the backend schema
    pub discount: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    /// Amount tendered by the customer
    pub payment_amount: i64,
    pub change_amount: i64,
}

/// Persisted transaction returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub store_id: String,
    pub cashier_id: String,
    pub items: Vec<TransactionItem>,
    pub subtotal: i64,
    pub tax: i64,
    pub discount: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub payment_amount: i64,
    pub change_amount: i64,
    pub status: TransactionStatus,
    /// Unix milliseconds
    pub created_at: i64,
}

impl Transaction {
    /// Build the persisted record from a submitted draft
    pub fn from_draft(id: impl Into<String>, draft: &TransactionDraft, created_at: i64) -> Self {
        Self {
            id: id.into(),
            store_id: draft.store_id.clone(),
            cashier_id: draft.cashier_id.clone(),
            items: draft.items.clone(),
            subtotal: draft.subtotal,
            tax: draft.tax,
            discount: draft.discount,
            total: draft.total,
            payment_method: draft.payment_method,
            payment_amount: draft.payment_amount,
            change_amount: draft.change_amount,
            status: TransactionStatus::Completed,
            created_at,
        }
    }
}
