//! # dhaba-checkout: Checkout Session Orchestration for Dhaba POS
//!
//! The stateful shell around [`dhaba_core`]: one checkout session's cart
//! ownership, coupon refresh, lifecycle, configuration, receipt building,
//! and the async hand-off of finalized orders to caller-supplied sinks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dhaba Checkout Data Flow                           │
//! │                                                                         │
//! │  Screen action (tap item, enter coupon, tap Print)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dhaba-checkout (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐  │   │
//! │  │   │CheckoutSession│   │    config     │   │    catalog     │  │   │
//! │  │   │ cart + stage  │   │ TaxConfig →   │   │ CouponRecord → │  │   │
//! │  │   │ coupon refresh│   │ TaxPolicy     │   │ Coupon         │  │   │
//! │  │   └───────┬───────┘   └───────────────┘   └────────────────┘  │   │
//! │  │           │                                                    │   │
//! │  │           ▼ finalize()                                         │   │
//! │  │   ┌───────────────┐       ┌──────────────────────────────┐    │   │
//! │  │   │ FinalizedOrder│ ────► │ receipt  │  sink (async,     │    │   │
//! │  │   │  (immutable)  │       │ document │  timeout, retry)  │    │   │
//! │  │   └───────────────┘       └──────────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller-owned printer / order-history store                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`session`] - The checkout session state machine
//! - [`config`] - Deployment configuration (tax wiring, store identity)
//! - [`catalog`] - Coupon-catalog adapter and in-memory implementation
//! - [`receipt`] - Receipt document + fixed-width rendering
//! - [`sink`] - Async sink ports with timeout dispatch
//! - [`error`] - Session-level error surface
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use dhaba_checkout::catalog::InMemoryCouponCatalog;
//! use dhaba_checkout::config::CheckoutConfig;
//! use dhaba_checkout::session::CheckoutSession;
//! use dhaba_core::{Money, PaymentMethod};
//!
//! let config = CheckoutConfig::default();
//! let catalog = Arc::new(InMemoryCouponCatalog::new());
//! let mut session = CheckoutSession::from_config(catalog, &config).unwrap();
//!
//! session.add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000)).unwrap();
//! let order = session.finalize(PaymentMethod::Cash).unwrap();
//! assert_eq!(order.total.paise(), 9450); // ₹90.00 + 5% GST
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod receipt;
pub mod session;
pub mod sink;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CouponRecord, CouponRecordKind, InMemoryCouponCatalog};
pub use config::{CheckoutConfig, TaxConfig, TaxConfigMode};
pub use error::{CheckoutError, ConfigError, SinkError};
pub use receipt::{ReceiptDocument, ReceiptLine};
pub use session::CheckoutSession;
pub use sink::{persistence_payload, OrderSink, SinkDispatcher};
