//! REST transaction gateway
//!
//! Speaks a PostgREST-style API: insert the transaction row (with
//! `Prefer: return=representation` so the stored record comes back), then
//! settle stock per item through the `decrement_stock` RPC. When the RPC is
//! not installed on the backend, fall back to a read-then-clamped-update of
//! the product row. Stock settlement is best-effort: the transaction row is
//! already persisted, so a failed decrement is logged and surfaced to
//! operations rather than failing the sale.

use super::{GatewayError, TransactionGateway};
use crate::config::EngineConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Transaction, TransactionDraft, TransactionStatus};
use std::time::Duration;

/// Insert payload: the draft plus the status column the backend expects
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    #[serde(flatten)]
    draft: &'a TransactionDraft,
    status: TransactionStatus,
}

#[derive(Debug, Deserialize)]
struct StockRow {
    stock: i64,
}

#[derive(Debug, Serialize)]
struct DecrementStockParams<'a> {
    product_id: &'a str,
    qty: u32,
}

/// Gateway backed by a PostgREST-style transaction service
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestGateway {
    pub fn new(config: &EngineConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.submit_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            api_key: config.gateway_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Decrement one product's stock, RPC first, manual update as fallback
    async fn decrement_stock(&self, product_id: &str, qty: u32) -> Result<(), GatewayError> {
        let rpc = self
            .request(self.client.post(self.endpoint("rpc/decrement_stock")))
            .json(&DecrementStockParams { product_id, qty })
            .send()
            .await?;
        if rpc.status().is_success() {
            return Ok(());
        }

        tracing::warn!(
            product_id,
            status = rpc.status().as_u16(),
            "decrement_stock RPC unavailable, falling back to manual update"
        );

        let rows: Vec<StockRow> = self
            .request(self.client.get(self.endpoint("products")))
            .query(&[("id", format!("eq.{product_id}")), ("select", "stock".to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(row) = rows.first() {
            let remaining = (row.stock - i64::from(qty)).max(0);
            self.request(self.client.patch(self.endpoint("products")))
                .query(&[("id", format!("eq.{product_id}"))])
                .json(&serde_json::json!({ "stock": remaining }))
                .send()
                .await?
                .error_for_status()?;
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionGateway for RestGateway {
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, GatewayError> {
        let response = self
            .request(self.client.post(self.endpoint("transactions")))
            .header("Prefer", "return=representation")
            .json(&TransactionRow {
                draft,
                status: TransactionStatus::Completed,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let mut rows: Vec<Transaction> = response.json().await?;
        let transaction = rows.pop().ok_or_else(|| GatewayError::Rejected {
            status: status.as_u16(),
            body: "empty representation".to_string(),
        })?;

        for item in &draft.items {
            if let Err(e) = self.decrement_stock(&item.product_id, item.quantity).await {
                tracing::error!(
                    product_id = %item.product_id,
                    error = %e,
                    "stock settlement failed after persisted transaction"
                );
            }
        }

        tracing::info!(
            transaction_id = %transaction.id,
            total = transaction.total,
            "transaction persisted via REST gateway"
        );
        Ok(transaction)
    }

    async fn recent(
        &self,
        store_id: &str,
        limit: usize,
    ) -> Result<Vec<Transaction>, GatewayError> {
        let rows = self
            .request(self.client.get(self.endpoint("transactions")))
            .query(&[
                ("store_id", format!("eq.{store_id}")),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TransactionItem;
    use shared::order::PaymentMethod;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = EngineConfig {
            gateway_url: "http://localhost:3000/".to_string(),
            ..EngineConfig::default()
        };
        let gateway = RestGateway::new(&config).unwrap();
        assert_eq!(
            gateway.endpoint("transactions"),
            "http://localhost:3000/transactions"
        );
    }

    #[test]
    fn test_insert_row_carries_status_and_draft_fields() {
        let draft = TransactionDraft {
            store_id: "store-1".to_string(),
            cashier_id: "emp-1".to_string(),
            items: vec![TransactionItem {
                product_id: "prod-1".to_string(),
                name: "Lychee Tea".to_string(),
                unit_price: 18000,
                quantity: 1,
            }],
            subtotal: 18000,
            tax: 1800,
            discount: 0,
            total: 19800,
            payment_method: PaymentMethod::Card,
            payment_amount: 19800,
            change_amount: 0,
        };

        let row = TransactionRow {
            draft: &draft,
            status: TransactionStatus::Completed,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["total"], 19800);
        assert_eq!(value["payment_method"], "CARD");
        assert_eq!(value["items"][0]["product_id"], "prod-1");
    }
}
