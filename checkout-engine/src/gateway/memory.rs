//! In-memory transaction gateway
//!
//! Reference implementation for tests and offline demos: persists to a
//! `Vec`, settles stock through an attached `InMemoryCatalog`, and can be
//! scripted to fail so retry paths are testable.

use super::{GatewayError, TransactionGateway};
use crate::catalog::InMemoryCatalog;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{Transaction, TransactionDraft};
use std::sync::Arc;

#[derive(Default)]
pub struct MemoryGateway {
    catalog: Option<Arc<InMemoryCatalog>>,
    transactions: Mutex<Vec<Transaction>>,
    /// Remaining submissions to fail before succeeding again
    fail_remaining: Mutex<u32>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a catalog so successful submissions decrement its stock
    pub fn with_catalog(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::default()
        }
    }

    /// Fail the next `times` submissions with `GatewayError::Unavailable`
    pub fn fail_next(&self, times: u32) {
        *self.fail_remaining.lock() = times;
    }

    /// Everything persisted so far, oldest first
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().clone()
    }
}

impl std::fmt::Debug for MemoryGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGateway")
            .field("stored", &self.transactions.lock().len())
            .finish()
    }
}

#[async_trait]
impl TransactionGateway for MemoryGateway {
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, GatewayError> {
        {
            let mut remaining = self.fail_remaining.lock();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(GatewayError::Unavailable("scripted failure".to_string()));
            }
        }

        let transaction = Transaction::from_draft(
            uuid::Uuid::new_v4().to_string(),
            draft,
            chrono::Utc::now().timestamp_millis(),
        );

        if let Some(catalog) = &self.catalog {
            for item in &draft.items {
                catalog.decrement_stock(&item.product_id, item.quantity);
            }
        }

        tracing::info!(
            transaction_id = %transaction.id,
            total = transaction.total,
            "transaction stored in memory"
        );
        self.transactions.lock().push(transaction.clone());
        Ok(transaction)
    }

    async fn recent(
        &self,
        store_id: &str,
        limit: usize,
    ) -> Result<Vec<Transaction>, GatewayError> {
        Ok(self
            .transactions
            .lock()
            .iter()
            .rev()
            .filter(|tx| tx.store_id == store_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
