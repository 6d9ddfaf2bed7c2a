//! # Checkout Error Types
//!
//! Session-level error surface for dhaba-checkout.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CouponError / CoreError (dhaba-core)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutError (this module) ← adds session + sink failure modes       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer decides how to surface it                          │
//! │  (inline validation text, toast, retry button — never a blocking      │
//! │   confirm/alert popup driving control flow)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use dhaba_core::{CoreError, CouponError};

// =============================================================================
// Sink Error
// =============================================================================

/// Failure delivering a finalized order to an external sink.
///
/// Sink failures are reported with a retry affordance and NEVER roll back
/// finalization: the order record is already committed in memory. The
/// caller retries the sink call only.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// The sink did not answer within the configured timeout.
    ///
    /// ## When This Occurs
    /// - Thermal printer powered off or asleep
    /// - Persistence endpoint unreachable
    #[error("{sink} sink timed out after {timeout_ms} ms")]
    Timeout { sink: String, timeout_ms: u64 },

    /// The sink answered with a failure of its own.
    #[error("{sink} sink failed: {message}")]
    Device { sink: String, message: String },
}

impl SinkError {
    /// Names the sink that failed (for the retry affordance label).
    pub fn sink(&self) -> &str {
        match self {
            SinkError::Timeout { sink, .. } => sink,
            SinkError::Device { sink, .. } => sink,
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Deployment configuration that cannot be turned into a tax policy.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Wrong number of rates for the configured mode.
    #[error("tax mode '{mode}' expects {expected} rate(s), got {actual}")]
    RateCount {
        mode: String,
        expected: usize,
        actual: usize,
    },

    /// A rate outside 0–100%.
    #[error("tax rate {rate}% is out of range (0-100)")]
    RateOutOfRange { rate: f64 },
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Everything a checkout session operation can fail with.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Billing error from the core engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Coupon lookup / eligibility failure; cart pricing unchanged.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Sink delivery failure; the finalized order stands.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Invalid deployment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Mutation attempted after finalize. Terminal stage: start a new
    /// session for the next order.
    #[error("checkout session is already finalized; start a new order")]
    SessionFinalized,
}

// =============================================================================
// Unit Tests
// =============================================================================
