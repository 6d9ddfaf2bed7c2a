//! # Order Totalizer & Finalizer
//!
//! Combines subtotal, discount, and tax into the amount payable, and
//! freezes a priced cart into an immutable order record.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      totalize() — always recomputed                     │
//! │                                                                         │
//! │  cart.subtotal() ────────────────────────────────┐                      │
//! │       │                                          │                      │
//! │       ▼                                          │                      │
//! │  refresh coupon snapshot from CURRENT subtotal   │                      │
//! │  (below minimum now? → drop it, report it)       │                      │
//! │       │                                          │                      │
//! │       ▼                                          ▼                      │
//! │  discount ──► taxable base (pre/post) ──► TaxPolicy::compute()          │
//! │       │                                          │                      │
//! │       └──────────────┬───────────────────────────┘                      │
//! │                      ▼                                                  │
//! │        total = subtotal - discount + total_tax    (exact, no rounding)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `Building → Discounted (optional) → Finalized`. Finalized is terminal:
//! the record is immutable and a new checkout starts a new cart. Side
//! effects (printing, persistence) live behind caller-supplied sinks in the
//! checkout crate, never here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::coupon::AppliedCoupon;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tax::{TaxBreakdown, TaxPolicy, TaxableBase};

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settled the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// UPI transfer (QR / collect request).
    Upi,
}

/// Receipt label for the payment method.
impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// Order Stage
// =============================================================================

/// Where a checkout session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    /// Items being added; no coupon attached.
    Building,
    /// A coupon is attached; still mutable.
    Discounted,
    /// Order record created. Terminal: start a new cart for the next order.
    Finalized,
}

impl Default for OrderStage {
    fn default() -> Self {
        OrderStage::Building
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The derived pricing view of a cart.
///
/// Never stored: recomputed from the cart on every subtotal or discount
/// change, so it cannot drift from the lines it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of line totals before discount and tax.
    pub subtotal: Money,

    /// Discount actually applied (zero when no coupon survives refresh).
    pub discount: Money,

    /// The refreshed coupon snapshot the discount came from.
    pub coupon: Option<AppliedCoupon>,

    /// True when a previously attached coupon was dropped because the cart
    /// no longer meets its minimum order amount.
    pub coupon_dropped: bool,

    /// Itemized tax lines plus total-tax scalar.
    pub tax: TaxBreakdown,

    /// Amount payable: `subtotal - discount + total_tax`.
    pub total: Money,
}

/// Combines already-rounded components into the amount payable.
///
/// Exact integer arithmetic on paise; this function never introduces new
/// rounding. Non-negativity is guaranteed upstream by the coupon resolver's
/// clamp, so it is asserted here rather than re-clamped.
pub fn total_payable(subtotal: Money, discount: Money, total_tax: Money) -> Money {
    let total = subtotal - discount + total_tax;
    debug_assert!(
        !total.is_negative(),
        "payable total went negative: subtotal {} discount {} tax {}",
        subtotal,
        discount,
        total_tax
    );
    total
}

/// Prices a cart under a tax policy and taxable-base selection.
///
/// The attached coupon snapshot, if any, is refreshed against the current
/// subtotal before pricing, so a stale `discount_amount` never reaches a
/// total. A coupon whose minimum the cart no longer meets is dropped from
/// the pricing (and flagged via `coupon_dropped` so the session layer can
/// detach it and tell the cashier).
pub fn totalize(cart: &Cart, policy: &TaxPolicy, base: TaxableBase) -> OrderTotals {
    let subtotal = cart.subtotal();

    let (coupon, coupon_dropped) = match cart.applied_coupon() {
        Some(applied) if applied.coupon.eligible_for(subtotal) => {
            let refreshed = AppliedCoupon {
                coupon: applied.coupon.clone(),
                discount_amount: applied.coupon.discount_for(subtotal),
            };
            (Some(refreshed), false)
        }
        Some(_) => (None, true),
        None => (None, false),
    };

    let discount = coupon
        .as_ref()
        .map(|c| c.discount_amount)
        .unwrap_or_default();

    let tax = policy.compute(base.select(subtotal, discount));
    let total = total_payable(subtotal, discount, tax.total_tax);

    OrderTotals {
        subtotal,
        discount,
        coupon,
        coupon_dropped,
        tax,
        total,
    }
}

// =============================================================================
// Finalized Order
// =============================================================================

/// The frozen record of a completed checkout.
///
/// Created once by [`finalize`] and immutable thereafter. The cart it was
/// built from is cleared by the session; this record is what printing and
/// persistence sinks receive.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedOrder {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable order number, e.g. `ORD-20240312-8F41C2D0`.
    pub order_number: String,

    /// Line items, frozen at finalization.
    pub lines: Vec<CartLine>,

    /// Subtotal before discount and tax.
    pub subtotal: Money,

    /// Discount applied.
    pub discount: Money,

    /// Code of the coupon the discount came from, if any.
    pub coupon_code: Option<String>,

    /// Itemized tax lines with total.
    pub tax: TaxBreakdown,

    /// Amount payable.
    pub total: Money,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// When the order was finalized.
    #[ts(as = "String")]
    pub finalized_at: DateTime<Utc>,
}

/// Freezes a priced cart into a [`FinalizedOrder`].
///
/// Requires at least one line (`CoreError::EmptyCart` otherwise; the cart
/// is left untouched for correction). Performs no side effects: printing
/// and persistence are caller-supplied sinks, so a dead printer can never
/// corrupt pricing.
pub fn finalize(
    cart: &Cart,
    totals: &OrderTotals,
    payment_method: PaymentMethod,
) -> CoreResult<FinalizedOrder> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let finalized_at = Utc::now();

    Ok(FinalizedOrder {
        id: Uuid::new_v4().to_string(),
        order_number: generate_order_number(finalized_at),
        lines: cart.lines().to_vec(),
        subtotal: totals.subtotal,
        discount: totals.discount,
        coupon_code: totals.coupon.as_ref().map(|c| c.coupon.code.clone()),
        tax: totals.tax.clone(),
        total: totals.total,
        payment_method,
        finalized_at,
    })
}

/// Order number: date component plus a short unique suffix.
fn generate_order_number(at: DateTime<Utc>) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", at.format("%Y%m%d"), uuid[..8].to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
