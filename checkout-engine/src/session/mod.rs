//! OrderSession - cart ownership and the checkout state machine
//!
//! One session per register. Operations take `&mut self`, so the single
//! logical owner is enforced by the borrow checker; no internal locking.
//! Catalog lookups and gateway submission are the only suspending calls.
//!
//! # State Machine
//!
//! ```text
//! Building --begin_checkout (non-empty)--> AwaitingPayment
//! AwaitingPayment --confirm_payment (sufficient)--> Processing
//! AwaitingPayment --cancel_checkout--> Building
//! Processing --gateway ok--> Completed
//! Processing --gateway err--> Failed
//! Failed --confirm_payment retry--> Processing
//! Completed / Failed --acknowledge--> Building (fresh)
//! ```
//!
//! Cart mutations are accepted only in `Building`; once checkout starts the
//! totals are frozen into the payment intent and the cart the cashier sees
//! is exactly the cart that will be submitted.

mod error;
pub use error::{SessionError, SessionResult};


use crate::catalog::ProductCatalog;
use crate::config::EngineConfig;
use crate::display::CartBroadcaster;
use crate::gateway::TransactionGateway;
use crate::money;
use crate::receipt::{ReceiptSink, ReceiptSummary};
use rust_decimal::Decimal;
use shared::models::{OperatorContext, TransactionDraft, TransactionItem};
use shared::order::{
    CartEvent, CartEventKind, CartLine, CartSnapshot, CheckoutState, PaymentMethod,
};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Payment data captured between checkout start and completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub method: PaymentMethod,
    /// Session total frozen at checkout start
    pub total: i64,
    /// Amount tendered; kept equal to `total` for non-cash methods
    pub tendered: i64,
}

impl PaymentIntent {
    fn new(total: i64) -> Self {
        Self {
            method: PaymentMethod::Cash,
            total,
            tendered: total,
        }
    }

    /// Change due to the customer; only cash can produce change
    pub fn change(&self) -> i64 {
        if self.method.is_cash() {
            money::change_due(self.tendered, self.total)
        } else {
            0
        }
    }
}

/// Checkout session for one register
pub struct OrderSession {
    operator: OperatorContext,
    catalog: Arc<dyn ProductCatalog>,
    gateway: Arc<dyn TransactionGateway>,
    broadcaster: CartBroadcaster,
    receipt_sink: Option<Arc<dyn ReceiptSink>>,
    tax_rate: Decimal,
    lines: Vec<CartLine>,
    state: CheckoutState,
    intent: Option<PaymentIntent>,
}

impl std::fmt::Debug for OrderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSession")
            .field("operator", &self.operator.employee_id)
            .field("state", &self.state)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl OrderSession {
    /// Create an empty session for the given cashier
    ///
    /// The operator context is passed explicitly; the session never reads
    /// ambient process-wide state.
    pub fn new(
        operator: OperatorContext,
        catalog: Arc<dyn ProductCatalog>,
        gateway: Arc<dyn TransactionGateway>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            operator,
            catalog,
            gateway,
            broadcaster: CartBroadcaster::new(),
            receipt_sink: None,
            tax_rate: config.tax_rate(),
            lines: Vec::new(),
            state: CheckoutState::Building,
            intent: None,
        }
    }

    /// Attach a receipt sink notified on every completed sale
    pub fn with_receipt_sink(mut self, sink: Arc<dyn ReceiptSink>) -> Self {
        self.receipt_sink = Some(sink);
        self
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn payment_intent(&self) -> Option<&PaymentIntent> {
        self.intent.as_ref()
    }

    pub fn subtotal(&self) -> i64 {
        money::subtotal(&self.lines)
    }

    pub fn tax(&self) -> i64 {
        money::tax(self.subtotal(), self.tax_rate)
    }

    pub fn total(&self) -> i64 {
        let totals = money::totals(&self.lines, self.tax_rate);
        totals.total
    }

    /// Complete cart state for display mirroring
    pub fn snapshot(&self) -> CartSnapshot {
        let totals = money::totals(&self.lines, self.tax_rate);
        CartSnapshot {
            state: self.state,
            lines: self.lines.clone(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            item_count: money::item_count(&self.lines),
        }
    }

    /// Attach a customer display (or any mirror) to this session
    pub fn subscribe_display(&self) -> broadcast::Receiver<CartEvent> {
        self.broadcaster.subscribe()
    }

    /// Whether at least one display is currently attached
    pub fn display_connected(&self) -> bool {
        self.broadcaster.receiver_count() > 0
    }

    // ========================================================================
    // Cart mutations (Building only)
    // ========================================================================

    /// Add one unit of a product, inserting a new line or bumping the
    /// existing one
    ///
    /// The line snapshots name and price at add time; later catalog edits
    /// do not touch it. Fails with `StockExceeded` when the bumped quantity
    /// would exceed the catalog's current stock, leaving the cart unchanged.
    pub async fn add_line(&mut self, product_id: &str) -> SessionResult<()> {
        self.ensure_building()?;
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| SessionError::ProductNotFound(product_id.to_string()))?;

        let current = self
            .lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0);
        let requested = current + 1;
        if requested > product.stock {
            return Err(SessionError::StockExceeded {
                product_id: product_id.to_string(),
                requested,
                available: product.stock,
            });
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name,
                unit_price: product.price,
                quantity: 1,
            }),
        }
        self.publish(CartEventKind::LineAdded);
        Ok(())
    }

    /// Set a line's quantity, clamped to the catalog's current stock
    ///
    /// Zero removes the line; an absent line is a no-op, not an error.
    pub async fn set_quantity(&mut self, product_id: &str, new_quantity: u32) -> SessionResult<()> {
        self.ensure_building()?;
        let Some(position) = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
        else {
            return Ok(());
        };

        if new_quantity == 0 {
            self.lines.remove(position);
            self.publish(CartEventKind::LineRemoved);
            return Ok(());
        }

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| SessionError::ProductNotFound(product_id.to_string()))?;
        let clamped = new_quantity.min(product.stock);
        if clamped == 0 {
            self.lines.remove(position);
            self.publish(CartEventKind::LineRemoved);
        } else {
            self.lines[position].quantity = clamped;
            self.publish(CartEventKind::QuantityChanged);
        }
        Ok(())
    }

    /// Remove a line unconditionally; absent lines are a no-op
    pub fn remove_line(&mut self, product_id: &str) -> SessionResult<()> {
        self.ensure_building()?;
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() != before {
            self.publish(CartEventKind::LineRemoved);
        }
        Ok(())
    }

    /// Empty the cart; idempotent
    pub fn clear(&mut self) -> SessionResult<()> {
        self.ensure_building()?;
        if self.lines.is_empty() {
            return Ok(());
        }
        self.lines.clear();
        self.publish(CartEventKind::CartCleared);
        Ok(())
    }

    // ========================================================================
    // Checkout
    // ========================================================================

    /// Freeze the cart totals into a payment intent and start checkout
    pub fn begin_checkout(&mut self) -> SessionResult<()> {
        if self.state != CheckoutState::Building {
            return Err(SessionError::InvalidState {
                operation: "begin_checkout",
                state: self.state,
            });
        }
        if self.lines.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        let totals = money::totals(&self.lines, self.tax_rate);
        self.intent = Some(PaymentIntent::new(totals.total));
        self.state = CheckoutState::AwaitingPayment;
        tracing::info!(
            cashier = %self.operator.employee_id,
            total = totals.total,
            "checkout started"
        );
        self.publish(CartEventKind::CheckoutStarted);
        Ok(())
    }

    /// Abandon the payment step and reopen the cart
    pub fn cancel_checkout(&mut self) -> SessionResult<()> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(SessionError::InvalidState {
                operation: "cancel_checkout",
                state: self.state,
            });
        }
        self.intent = None;
        self.state = CheckoutState::Building;
        self.publish(CartEventKind::CheckoutCancelled);
        Ok(())
    }

    /// Replace the payment method on the intent
    ///
    /// Switching to a non-cash method snaps the tendered amount back to the
    /// frozen total; only cash accepts a separate tender.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> SessionResult<()> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(SessionError::InvalidState {
                operation: "select_payment_method",
                state: self.state,
            });
        }
        let Some(intent) = self.intent.as_mut() else {
            return Err(SessionError::InvalidState {
                operation: "select_payment_method",
                state: self.state,
            });
        };
        intent.method = method;
        if !method.is_cash() {
            intent.tendered = intent.total;
        }
        Ok(())
    }

    /// Record the cash amount handed over by the customer
    ///
    /// Not validated against the total here; sufficiency is checked at
    /// confirmation so the cashier can type freely.
    pub fn set_tendered(&mut self, amount: i64) -> SessionResult<()> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(SessionError::InvalidState {
                operation: "set_tendered",
                state: self.state,
            });
        }
        let Some(intent) = self.intent.as_mut() else {
            return Err(SessionError::InvalidState {
                operation: "set_tendered",
                state: self.state,
            });
        };
        if !intent.method.is_cash() {
            return Err(SessionError::InvalidOperation(
                "tendered amount only applies to cash payments".to_string(),
            ));
        }
        if amount < 0 {
            return Err(SessionError::InvalidOperation(
                "tendered amount must be non-negative".to_string(),
            ));
        }
        intent.tendered = amount;
        Ok(())
    }

    /// Validate the tender, submit the transaction, and settle the session
    ///
    /// Valid in `AwaitingPayment` and, for retry after a submission
    /// failure, in `Failed`. On gateway failure the cart and intent are
    /// kept byte-for-byte so an identical retry can succeed.
    pub async fn confirm_payment(&mut self) -> SessionResult<ReceiptSummary> {
        match self.state {
            CheckoutState::AwaitingPayment | CheckoutState::Failed => {}
            state => {
                return Err(SessionError::InvalidState {
                    operation: "confirm_payment",
                    state,
                });
            }
        }
        let Some(intent) = self.intent.as_ref() else {
            return Err(SessionError::InvalidState {
                operation: "confirm_payment",
                state: self.state,
            });
        };

        if intent.method.is_cash() && intent.tendered < intent.total {
            return Err(SessionError::InsufficientPayment {
                tendered: intent.tendered,
                total: intent.total,
            });
        }

        let method = intent.method;
        let tendered = intent.tendered;
        let change = intent.change();
        let draft = self.build_draft(method, tendered, change);

        self.state = CheckoutState::Processing;
        self.publish(CartEventKind::SubmissionStarted);
        tracing::info!(
            cashier = %self.operator.employee_id,
            total = draft.total,
            method = %method,
            "submitting transaction"
        );

        match self.gateway.submit(&draft).await {
            Ok(transaction) => {
                self.state = CheckoutState::Completed;
                self.publish(CartEventKind::TransactionCompleted);
                tracing::info!(transaction_id = %transaction.id, "transaction persisted");

                let summary = ReceiptSummary {
                    transaction_id: transaction.id,
                    total: draft.total,
                    payment_method: method,
                    change_amount: change,
                };
                if let Some(sink) = &self.receipt_sink {
                    sink.deliver(&summary);
                }
                Ok(summary)
            }
            Err(e) => {
                self.state = CheckoutState::Failed;
                self.publish(CartEventKind::SubmissionFailed);
                tracing::error!(error = %e, "submission failed, session kept for retry");
                Err(SessionError::Submission(e))
            }
        }
    }

    /// Dismiss a completed or failed checkout and start a fresh session
    pub fn acknowledge(&mut self) -> SessionResult<()> {
        match self.state {
            CheckoutState::Completed | CheckoutState::Failed => {}
            state => {
                return Err(SessionError::InvalidState {
                    operation: "acknowledge",
                    state,
                });
            }
        }
        self.lines.clear();
        self.intent = None;
        self.state = CheckoutState::Building;
        self.publish(CartEventKind::SessionReset);
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_building(&self) -> SessionResult<()> {
        if self.state != CheckoutState::Building {
            return Err(SessionError::CheckoutActive(self.state));
        }
        Ok(())
    }

    fn build_draft(&self, method: PaymentMethod, tendered: i64, change: i64) -> TransactionDraft {
        let totals = money::totals(&self.lines, self.tax_rate);
        TransactionDraft {
            store_id: self.operator.store_id.clone(),
            cashier_id: self.operator.employee_id.clone(),
            items: self
                .lines
                .iter()
                .map(|line| TransactionItem {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                })
                .collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: 0,
            total: totals.total,
            payment_method: method,
            payment_amount: tendered,
            change_amount: change,
        }
    }

    fn publish(&self, kind: CartEventKind) {
        self.broadcaster.publish(kind, self.snapshot());
    }
}
