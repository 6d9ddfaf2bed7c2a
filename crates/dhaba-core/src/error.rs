//! # Error Types
//!
//! Domain-specific error types for dhaba-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dhaba-core errors (this file)                                          │
//! │  ├── CouponError      - Coupon lookup / eligibility failures            │
//! │  ├── CoreError        - General billing errors                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  dhaba-checkout errors (separate crate)                                 │
//! │  ├── SinkError        - Printing / persistence hand-off failures        │
//! │  └── CheckoutError    - Session-level surface                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → presentation       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, amounts, item id)
//! 3. Errors are enum variants, never String
//! 4. Pricing errors are recovered locally and surfaced as validation
//!    messages; they never panic and never corrupt cart state

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Coupon Error
// =============================================================================

/// Coupon resolution failures.
///
/// Both variants leave cart pricing untouched: the caller keeps whatever
/// coupon state existed before the attempt.
#[derive(Debug, Clone, Error)]
pub enum CouponError {
    /// Code does not match any catalog entry (after case-insensitive lookup).
    #[error("Coupon code not found: {code}")]
    NotFound { code: String },

    /// Subtotal does not meet the coupon's minimum order amount.
    ///
    /// ## When This Occurs
    /// - Applying a gated coupon to a small order
    /// - Re-resolving after items were removed and the cart shrank below
    ///   the minimum
    #[error("Order subtotal {subtotal} is below the {required} minimum for this coupon")]
    BelowMinimum { required: Money, subtotal: Money },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core billing errors.
///
/// These represent business rule violations. They are caught at the session
/// boundary and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity change requested for an item that has no cart line.
    ///
    /// Caller bug by contract (new lines must go through `add_item`), so
    /// the session layer treats it as a logged no-op rather than
    /// propagating it to the user.
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),

    /// Finalize attempted on a cart with zero lines.
    ///
    /// Surfaced to the user ("add items before checkout"); the cart is
    /// left untouched for correction.
    #[error("Cannot finalize an empty cart")]
    EmptyCart,

    /// Coupon resolution failed (wraps CouponError).
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when boundary input (catalog records, configuration,
/// user-entered codes) doesn't meet requirements. Used for early validation
/// before billing logic runs.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unexpected characters in a coupon code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
