//! End-to-end checkout flow against the in-memory collaborators
//!
//! Exercises the full register round trip: seed catalog, build cart,
//! take payment, persist the transaction, settle stock, emit the receipt,
//! mirror everything to a display subscriber.

use checkout_engine::{
    CartEventKind, CheckoutState, EngineConfig, InMemoryCatalog, MemoryGateway, OperatorContext,
    OrderSession, PaymentMethod, Product, ReceiptSink, ReceiptSummary, TransactionGateway,
};
use parking_lot::Mutex;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<ReceiptSummary>>,
}

impl ReceiptSink for RecordingSink {
    fn deliver(&self, summary: &ReceiptSummary) {
        self.delivered.lock().push(summary.clone());
    }
}

fn seeded_catalog() -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.seed([
        Product::new("prod-salad", "store-jkt", "Caesar Salad", 35000, 8),
        Product::new("prod-nasi", "store-jkt", "Nasi Goreng", 25000, 20),
        Product::new("prod-tea", "store-jkt", "Teh Manis", 8000, 50),
    ]);
    catalog
}

fn register(
    catalog: Arc<InMemoryCatalog>,
    sink: Arc<RecordingSink>,
) -> (OrderSession, Arc<MemoryGateway>) {
    let gateway = Arc::new(MemoryGateway::with_catalog(catalog.clone()));
    let session = OrderSession::new(
        OperatorContext::new("emp-7", "Budi", "store-jkt"),
        catalog,
        gateway.clone(),
        &EngineConfig::default(),
    )
    .with_receipt_sink(sink);
    (session, gateway)
}

#[tokio::test]
async fn test_full_cash_sale_round_trip() {
    init_tracing();
    let catalog = seeded_catalog();
    let sink = Arc::new(RecordingSink::default());
    let (mut session, gateway) = register(catalog.clone(), sink.clone());
    let mut display = session.subscribe_display();

    // Build: 2x nasi goreng + 1x teh manis = 58000, tax 5800, total 63800
    session.add_line("prod-nasi").await.unwrap();
    session.add_line("prod-nasi").await.unwrap();
    session.add_line("prod-tea").await.unwrap();
    assert_eq!(session.total(), 63800);

    // Pay cash with a 100k note
    session.begin_checkout().unwrap();
    session.set_tendered(100_000).unwrap();
    let summary = session.confirm_payment().await.unwrap();

    assert_eq!(summary.total, 63800);
    assert_eq!(summary.payment_method, PaymentMethod::Cash);
    assert_eq!(summary.change_amount, 36200);

    // Receipt reached the sink
    assert_eq!(sink.delivered.lock().len(), 1);
    assert_eq!(sink.delivered.lock()[0], summary);

    // Transaction persisted with the cart snapshot
    let stored = gateway.transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, summary.transaction_id);
    assert_eq!(stored[0].cashier_id, "emp-7");
    assert_eq!(stored[0].items.len(), 2);

    // Stock settled by the gateway, not the session
    assert_eq!(catalog.stock("prod-nasi"), Some(18));
    assert_eq!(catalog.stock("prod-tea"), Some(49));

    // History lists the sale
    let recent = gateway.recent("store-jkt", 5).await.unwrap();
    assert_eq!(recent.len(), 1);

    // Display saw the whole journey, ending on a completed snapshot
    let mut events = Vec::new();
    while let Ok(event) = display.try_recv() {
        events.push(event);
    }
    let kinds: Vec<CartEventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            CartEventKind::LineAdded,
            CartEventKind::LineAdded,
            CartEventKind::LineAdded,
            CartEventKind::CheckoutStarted,
            CartEventKind::SubmissionStarted,
            CartEventKind::TransactionCompleted,
        ]
    );
    let final_snapshot = &events.last().unwrap().snapshot;
    assert_eq!(final_snapshot.state, CheckoutState::Completed);
    assert_eq!(final_snapshot.total, 63800);

    // Next customer
    session.acknowledge().unwrap();
    assert!(session.is_empty());
    assert_eq!(session.state(), CheckoutState::Building);
}

#[tokio::test]
async fn test_failed_submission_is_retried_without_reentry() {
    init_tracing();
    let catalog = seeded_catalog();
    let sink = Arc::new(RecordingSink::default());
    let (mut session, gateway) = register(catalog.clone(), sink.clone());

    session.add_line("prod-salad").await.unwrap();
    session.begin_checkout().unwrap();
    session.select_payment_method(PaymentMethod::Qris).unwrap();

    gateway.fail_next(1);
    assert!(session.confirm_payment().await.is_err());
    assert_eq!(session.state(), CheckoutState::Failed);
    assert!(sink.delivered.lock().is_empty());
    // No partial side effects from the failed attempt
    assert_eq!(catalog.stock("prod-salad"), Some(8));

    // Cashier taps retry; nothing was re-entered
    let summary = session.confirm_payment().await.unwrap();
    assert_eq!(summary.payment_method, PaymentMethod::Qris);
    assert_eq!(summary.change_amount, 0);
    assert_eq!(catalog.stock("prod-salad"), Some(7));
    assert_eq!(sink.delivered.lock().len(), 1);
}

#[tokio::test]
async fn test_consecutive_customers_on_one_register() {
    init_tracing();
    let catalog = seeded_catalog();
    let sink = Arc::new(RecordingSink::default());
    let (mut session, gateway) = register(catalog.clone(), sink.clone());

    for expected_stock in [19, 18, 17] {
        session.add_line("prod-nasi").await.unwrap();
        session.begin_checkout().unwrap();
        session.select_payment_method(PaymentMethod::Card).unwrap();
        session.confirm_payment().await.unwrap();
        session.acknowledge().unwrap();

        assert_eq!(catalog.stock("prod-nasi"), Some(expected_stock));
    }

    assert_eq!(gateway.transactions().len(), 3);
    assert_eq!(sink.delivered.lock().len(), 3);
    let recent = gateway.recent("store-jkt", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
}
