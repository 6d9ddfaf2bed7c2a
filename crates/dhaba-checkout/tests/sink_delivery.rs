//! Sink dispatch behavior: timeouts, device failures, and caller-driven
//! retry. None of them may touch the already-finalized order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use dhaba_checkout::catalog::InMemoryCouponCatalog;
use dhaba_checkout::config::CheckoutConfig;
use dhaba_checkout::error::SinkError;
use dhaba_checkout::session::CheckoutSession;
use dhaba_checkout::sink::{OrderSink, SinkDispatcher};
use dhaba_core::{FinalizedOrder, Money, PaymentMethod};

fn finalized_order() -> FinalizedOrder {
    let catalog = Arc::new(InMemoryCouponCatalog::new());
    let mut session = CheckoutSession::from_config(catalog, &CheckoutConfig::default()).unwrap();
    session
        .add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000))
        .unwrap();
    session.finalize(PaymentMethod::Cash).unwrap()
}

/// Records every order number it receives.
#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<String>>,
}

#[async_trait]
impl OrderSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, order: &FinalizedOrder) -> Result<(), SinkError> {
        self.delivered
            .lock()
            .unwrap()
            .push(order.order_number.clone());
        Ok(())
    }
}

/// Never answers within any reasonable timeout (printer asleep).
struct StalledSink;

#[async_trait]
impl OrderSink for StalledSink {
    fn name(&self) -> &str {
        "receipt-printer"
    }

    async fn deliver(&self, _order: &FinalizedOrder) -> Result<(), SinkError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

/// Fails the first N deliveries, then succeeds (transient device error).
struct FlakySink {
    failures_left: AtomicUsize,
    attempts: AtomicUsize,
}

impl FlakySink {
    fn failing(times: usize) -> Self {
        FlakySink {
            failures_left: AtomicUsize::new(times),
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl OrderSink for FlakySink {
    fn name(&self) -> &str {
        "kot-printer"
    }

    async fn deliver(&self, _order: &FinalizedOrder) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(SinkError::Device {
                sink: self.name().to_string(),
                message: "paper out".to_string(),
            });
        }
        Ok(())
    }
}

#[tokio::test]
async fn successful_delivery_reaches_the_sink() {
    let order = finalized_order();
    let sink = RecordingSink::default();
    let dispatcher = SinkDispatcher::new(Duration::from_millis(500));

    dispatcher.dispatch(&sink, &order).await.unwrap();

    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.as_slice(), [order.order_number.clone()]);
}

#[tokio::test]
async fn stalled_sink_times_out_without_touching_the_order() {
    let order = finalized_order();
    let total_before = order.total;
    let dispatcher = SinkDispatcher::new(Duration::from_millis(200));

    let result = dispatcher.dispatch(&StalledSink, &order).await;

    match result {
        Err(SinkError::Timeout { sink, timeout_ms }) => {
            assert_eq!(sink, "receipt-printer");
            assert_eq!(timeout_ms, 200);
        }
        other => panic!("expected timeout, got {:?}", other),
    }

    // The committed record is untouched by the failure
    assert_eq!(order.total, total_before);
    assert_eq!(order.lines.len(), 1);
}

#[tokio::test]
async fn device_failure_then_manual_retry_succeeds() {
    let order = finalized_order();
    let sink = FlakySink::failing(1);
    let dispatcher = SinkDispatcher::new(Duration::from_millis(500));

    // First attempt: the device reports a failure
    let first = dispatcher.dispatch(&sink, &order).await;
    assert!(matches!(first, Err(SinkError::Device { .. })));

    // The caller retries the sink call only: same order, new dispatch
    dispatcher.dispatch(&sink, &order).await.unwrap();
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dispatcher_uses_configured_timeout() {
    let config = CheckoutConfig {
        sink_timeout_ms: 250,
        ..CheckoutConfig::default()
    };
    let dispatcher = SinkDispatcher::from_config(&config);
    assert_eq!(dispatcher.timeout(), Duration::from_millis(250));
}
