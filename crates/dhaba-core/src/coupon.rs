//! # Coupon Resolver
//!
//! Validates and prices a coupon code against the current subtotal.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("tea5", subtotal, catalog)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize: trim + uppercase → "TEA5"                                   │
//! │       │                                                                 │
//! │       ├── no catalog entry? ──────────► CouponError::NotFound           │
//! │       │                                                                 │
//! │       ├── subtotal < min_order? ──────► CouponError::BelowMinimum       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Flat(amount)      → discount = min(amount, subtotal)                   │
//! │  Percentage(rate)  → discount = round_half_up(subtotal × rate)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppliedCoupon { coupon, discount_amount }   (a snapshot!)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! An [`AppliedCoupon`] is a snapshot of the discount at one subtotal, not a
//! standing rule. It is stale the instant the subtotal changes; the engine
//! re-resolves before totalizing (see [`crate::order::totalize`]). Applying
//! a new coupon always replaces the previous one; coupons never stack.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CouponError;
use crate::money::Money;

// =============================================================================
// Coupon
// =============================================================================

/// The discount rule a coupon carries.
///
/// A tagged variant, matched exhaustively. There is no third kind hiding
/// behind a type string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// Fixed amount off the subtotal (e.g. ₹50 flat).
    Flat(Money),
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage { rate_bps: u32 },
}

/// A named discount rule read from the external coupon catalog.
///
/// Immutable once fetched for a given checkout: the engine never writes
/// back to the catalog and never caches entries beyond one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon code, uppercase-normalized, unique in the catalog.
    pub code: String,

    /// Flat or percentage rule.
    pub kind: CouponKind,

    /// Minimum subtotal required before this coupon applies.
    pub min_order_amount: Money,

    /// Optional category restriction. Catalog metadata only: the back
    /// office records it, but cart lines carry no category, so pricing
    /// does not consult it.
    pub category_scope: Option<BTreeSet<String>>,
}

impl Coupon {
    /// Creates a coupon with a normalized (trimmed, uppercased) code.
    pub fn new(
        code: &str,
        kind: CouponKind,
        min_order_amount: Money,
        category_scope: Option<BTreeSet<String>>,
    ) -> Self {
        Coupon {
            code: normalize_code(code),
            kind,
            min_order_amount,
            category_scope,
        }
    }

    /// Prices this coupon's discount against a subtotal.
    ///
    /// - `Flat`: clamped to the subtotal, so a flat discount never drives the
    ///   payable total negative
    /// - `Percentage`: rounded to the nearest paisa, half up
    ///
    /// Eligibility (minimum order) is checked by [`resolve`], not here.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self.kind {
            CouponKind::Flat(amount) => amount.min(subtotal),
            CouponKind::Percentage { rate_bps } => subtotal.percent_share(rate_bps),
        }
    }

    /// Whether the subtotal meets this coupon's minimum order amount.
    #[inline]
    pub fn eligible_for(&self, subtotal: Money) -> bool {
        subtotal >= self.min_order_amount
    }
}

/// A coupon priced against one specific subtotal.
///
/// Derived value: recomputed whenever the cart subtotal changes, never
/// persisted independently of the cart it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub coupon: Coupon,
    pub discount_amount: Money,
}

// =============================================================================
// Coupon Catalog (external collaborator)
// =============================================================================

/// Read-only lookup against the back office's coupon catalog.
///
/// Implementations receive an already-normalized (trimmed, uppercased)
/// code and must match it exactly. The engine treats the catalog as
/// external data: no caching beyond one checkout, no writes.
pub trait CouponCatalog {
    fn lookup(&self, code: &str) -> Option<Coupon>;
}

/// Canonical code form used for catalog lookups: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a coupon code against the current subtotal.
///
/// Lookup is case-insensitive exact match. On success the returned
/// [`AppliedCoupon`] replaces any previously applied coupon; on failure the
/// caller keeps its previous state and pricing is unchanged.
///
/// ## Example
/// ```rust
/// use dhaba_core::coupon::{resolve, Coupon, CouponCatalog, CouponKind};
/// use dhaba_core::money::Money;
///
/// struct OneCoupon(Coupon);
/// impl CouponCatalog for OneCoupon {
///     fn lookup(&self, code: &str) -> Option<Coupon> {
///         (self.0.code == code).then(|| self.0.clone())
///     }
/// }
///
/// let catalog = OneCoupon(Coupon::new(
///     "TEA5",
///     CouponKind::Flat(Money::from_paise(500)),
///     Money::zero(),
///     None,
/// ));
///
/// let applied = resolve("tea5", Money::from_paise(14000), &catalog).unwrap();
/// assert_eq!(applied.discount_amount.paise(), 500);
/// ```
pub fn resolve(
    code: &str,
    subtotal: Money,
    catalog: &dyn CouponCatalog,
) -> Result<AppliedCoupon, CouponError> {
    let normalized = normalize_code(code);

    let coupon = catalog
        .lookup(&normalized)
        .ok_or(CouponError::NotFound { code: normalized })?;

    if !coupon.eligible_for(subtotal) {
        return Err(CouponError::BelowMinimum {
            required: coupon.min_order_amount,
            subtotal,
        });
    }

    let discount_amount = coupon.discount_for(subtotal);
    Ok(AppliedCoupon {
        coupon,
        discount_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
