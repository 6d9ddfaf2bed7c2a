//! # Order Sinks
//!
//! The hand-off boundary between a finalized order and the outside world.
//!
//! ## Failure Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sink Dispatch                                     │
//! │                                                                         │
//! │  FinalizedOrder (already committed, immutable)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SinkDispatcher::dispatch(sink, order)                                  │
//! │       │                                                                 │
//! │       ├── ok ────────────────────────► delivered                        │
//! │       │                                                                 │
//! │       ├── sink error ────────────────► SinkError::Device                │
//! │       │                                                                 │
//! │       └── no answer within timeout ──► SinkError::Timeout               │
//! │                                                                         │
//! │  Failure NEVER rolls back finalization. The caller offers a retry      │
//! │  affordance and re-dispatches the SAME order — exactly like the        │
//! │  printer settings screen's "Test Print" button with its own retry.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cancellation
//! A preview dialog the user dismisses before confirming lives purely in
//! the UI layer: if the user cancels, `finalize` was never called and there
//! is nothing to dispatch. Once an order exists, it is never retracted.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use dhaba_core::FinalizedOrder;

use crate::config::CheckoutConfig;
use crate::error::SinkError;

// =============================================================================
// Sink Port
// =============================================================================

/// A caller-supplied destination for finalized orders.
///
/// Implementations: thermal receipt printer, KOT printer, order-history
/// persistence. The engine knows nothing about any of them beyond this
/// trait, so a dead printer can never corrupt pricing.
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Sink name used in logs, errors, and the retry affordance label.
    fn name(&self) -> &str;

    /// Delivers the order. Must be idempotent from the sink's point of
    /// view where possible: the caller may re-dispatch the same order
    /// after a reported failure.
    async fn deliver(&self, order: &FinalizedOrder) -> Result<(), SinkError>;
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Dispatches finalized orders to sinks with an explicit timeout.
#[derive(Debug, Clone)]
pub struct SinkDispatcher {
    timeout: Duration,
}

impl SinkDispatcher {
    /// Creates a dispatcher with an explicit per-delivery timeout.
    pub fn new(timeout: Duration) -> Self {
        SinkDispatcher { timeout }
    }

    /// Creates a dispatcher from deployment configuration.
    pub fn from_config(config: &CheckoutConfig) -> Self {
        SinkDispatcher::new(Duration::from_millis(config.sink_timeout_ms))
    }

    /// The configured per-delivery timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delivers `order` to `sink`, bounding the call with the configured
    /// timeout.
    ///
    /// On timeout or device error the order is untouched; the caller
    /// surfaces the failure and may call `dispatch` again with the same
    /// order (retry affects the sink call only, never the record).
    pub async fn dispatch(
        &self,
        sink: &dyn OrderSink,
        order: &FinalizedOrder,
    ) -> Result<(), SinkError> {
        debug!(sink = sink.name(), order = %order.order_number, "dispatching order");

        match tokio::time::timeout(self.timeout, sink.deliver(order)).await {
            Ok(Ok(())) => {
                info!(sink = sink.name(), order = %order.order_number, "order delivered");
                Ok(())
            }
            Ok(Err(err)) => {
                warn!(sink = sink.name(), order = %order.order_number, error = %err, "sink failed");
                Err(err)
            }
            Err(_elapsed) => {
                let err = SinkError::Timeout {
                    sink: sink.name().to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                };
                warn!(sink = sink.name(), order = %order.order_number, error = %err, "sink timed out");
                Err(err)
            }
        }
    }
}

// =============================================================================
// Persistence Payload
// =============================================================================

/// The JSON payload persistence sinks hand to the order-history store.
///
/// Kept here so every sink ships the identical record shape.
pub fn persistence_payload(order: &FinalizedOrder) -> Result<String, SinkError> {
    serde_json::to_string(order).map_err(|err| SinkError::Device {
        sink: "persistence".to_string(),
        message: err.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
