//! # Checkout Session
//!
//! One customer's checkout, from first item to finalized order.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CheckoutSession Lifecycle                          │
//! │                                                                         │
//! │        add_item / change_quantity / remove_item                         │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        ┌──────────┐   apply_coupon()    ┌────────────┐                  │
//! │        │ Building │ ──────────────────► │ Discounted │                  │
//! │        │          │ ◄────────────────── │            │                  │
//! │        └────┬─────┘   remove_coupon()   └─────┬──────┘                  │
//! │             │         (or auto-detach         │                         │
//! │             │          below minimum)         │                         │
//! │             │                                 │                         │
//! │             └──────────► finalize() ◄─────────┘                         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                        ┌───────────┐                                    │
//! │                        │ Finalized │  terminal: new order = new session │
//! │                        └───────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The session owns its cart exclusively and is driven synchronously by one
//! thread of control (the UI interaction thread). Nothing in the pricing
//! path suspends; the only async surface is sink dispatch, which happens
//! *after* finalize and lives in [`crate::sink`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use dhaba_core::coupon::resolve;
use dhaba_core::order::{finalize, totalize};
use dhaba_core::{
    AppliedCoupon, Cart, CoreError, CouponCatalog, FinalizedOrder, Money, OrderStage, OrderTotals,
    PaymentMethod, TaxPolicy, TaxableBase,
};

use crate::config::CheckoutConfig;
use crate::error::CheckoutError;

/// One checkout session: a cart, the catalog it resolves coupons against,
/// and the deployment's tax configuration.
pub struct CheckoutSession {
    cart: Cart,
    catalog: Arc<dyn CouponCatalog + Send + Sync>,
    policy: TaxPolicy,
    taxable_base: TaxableBase,
    finalized: bool,
}

impl CheckoutSession {
    /// Creates a session with an explicit tax policy and taxable base.
    pub fn new(
        catalog: Arc<dyn CouponCatalog + Send + Sync>,
        policy: TaxPolicy,
        taxable_base: TaxableBase,
    ) -> Self {
        CheckoutSession {
            cart: Cart::new(),
            catalog,
            policy,
            taxable_base,
            finalized: false,
        }
    }

    /// Creates a session from deployment configuration.
    pub fn from_config(
        catalog: Arc<dyn CouponCatalog + Send + Sync>,
        config: &CheckoutConfig,
    ) -> Result<Self, CheckoutError> {
        let policy = config.tax.policy()?;
        Ok(Self::new(catalog, policy, config.taxable_base))
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Where the session is in its lifecycle.
    pub fn stage(&self) -> OrderStage {
        if self.finalized {
            OrderStage::Finalized
        } else if self.cart.applied_coupon().is_some() {
            OrderStage::Discounted
        } else {
            OrderStage::Building
        }
    }

    fn ensure_open(&self) -> Result<(), CheckoutError> {
        if self.finalized {
            Err(CheckoutError::SessionFinalized)
        } else {
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of a menu item and refreshes the coupon snapshot.
    pub fn add_item(
        &mut self,
        item_id: &str,
        name: &str,
        unit_price: Money,
    ) -> Result<(), CheckoutError> {
        self.ensure_open()?;
        debug!(item = %item_id, price = %unit_price, "add item");

        self.cart.add_item(item_id, name, unit_price);
        self.refresh_coupon();
        Ok(())
    }

    /// Adjusts a line quantity by `delta` (≤ 0 removes the line).
    ///
    /// A quantity change for an item with no line is a caller bug by
    /// contract; it is logged and recovered as a no-op rather than
    /// surfaced to the user.
    pub fn change_quantity(&mut self, item_id: &str, delta: i64) -> Result<(), CheckoutError> {
        self.ensure_open()?;
        debug!(item = %item_id, delta, "change quantity");

        match self.cart.change_quantity(item_id, delta) {
            Ok(()) => {}
            Err(CoreError::ItemNotFound(item)) => {
                debug!(item = %item, "quantity change for absent item ignored");
            }
            Err(other) => return Err(other.into()),
        }

        self.refresh_coupon();
        Ok(())
    }

    /// Removes a line unconditionally.
    pub fn remove_item(&mut self, item_id: &str) -> Result<(), CheckoutError> {
        self.ensure_open()?;
        debug!(item = %item_id, "remove item");

        self.cart.remove_item(item_id);
        self.refresh_coupon();
        Ok(())
    }

    /// Empties the cart (lines and coupon).
    pub fn clear(&mut self) -> Result<(), CheckoutError> {
        self.ensure_open()?;
        debug!("clear cart");

        self.cart.clear();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Coupons
    // -------------------------------------------------------------------------

    /// Resolves and attaches a coupon, replacing any previous one.
    ///
    /// On failure (unknown code, below minimum) the previous coupon state
    /// is kept and pricing is unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> Result<AppliedCoupon, CheckoutError> {
        self.ensure_open()?;

        let catalog: &dyn CouponCatalog = self.catalog.as_ref();
        let applied = resolve(code, self.cart.subtotal(), catalog)?;

        info!(
            code = %applied.coupon.code,
            discount = %applied.discount_amount,
            "coupon applied"
        );
        self.cart.attach_coupon(applied.clone());
        Ok(applied)
    }

    /// Detaches the coupon, restoring the undiscounted subtotal.
    pub fn remove_coupon(&mut self) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        if let Some(applied) = self.cart.applied_coupon() {
            info!(code = %applied.coupon.code, "coupon removed");
        }
        self.cart.detach_coupon();
        Ok(())
    }

    /// Recomputes the attached coupon snapshot from the current subtotal.
    ///
    /// Called after every cart mutation so the snapshot is never stale. A
    /// coupon whose minimum the cart no longer meets auto-detaches (the
    /// Offers catalog's own rule outranks a stale discount).
    fn refresh_coupon(&mut self) {
        let subtotal = self.cart.subtotal();

        let Some(applied) = self.cart.applied_coupon().cloned() else {
            return;
        };

        if applied.coupon.eligible_for(subtotal) {
            let discount_amount = applied.coupon.discount_for(subtotal);
            self.cart.attach_coupon(AppliedCoupon {
                coupon: applied.coupon,
                discount_amount,
            });
        } else {
            warn!(
                code = %applied.coupon.code,
                minimum = %applied.coupon.min_order_amount,
                subtotal = %subtotal,
                "cart fell below coupon minimum; coupon detached"
            );
            self.cart.detach_coupon();
        }
    }

    // -------------------------------------------------------------------------
    // Pricing & finalization
    // -------------------------------------------------------------------------

    /// The current derived pricing view.
    ///
    /// Always recomputed from the cart; never cached.
    pub fn totals(&self) -> OrderTotals {
        totalize(&self.cart, &self.policy, self.taxable_base)
    }

    /// Freezes the cart into a [`FinalizedOrder`] and closes the session.
    ///
    /// On `EmptyCart` the session stays open and the cart untouched, so the
    /// cashier can correct and retry. On success the cart is cleared and
    /// every further mutation fails with `SessionFinalized`. Side effects
    /// (printing, persistence) happen afterwards via [`crate::sink`].
    pub fn finalize(&mut self, method: PaymentMethod) -> Result<FinalizedOrder, CheckoutError> {
        self.ensure_open()?;

        let totals = self.totals();
        let order = finalize(&self.cart, &totals, method)?;

        self.cart.clear();
        self.finalized = true;

        info!(
            order_number = %order.order_number,
            total = %order.total,
            method = %order.payment_method,
            "order finalized"
        );
        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CouponRecord, CouponRecordKind, InMemoryCouponCatalog};
    use dhaba_core::tax::TaxRate;

    fn catalog() -> Arc<InMemoryCouponCatalog> {
        let records = vec![
            CouponRecord {
                code: "TEA5".to_string(),
                kind: CouponRecordKind::Flat,
                value: 5.0,
                min_order_amount: 0.0,
                category_scope: None,
            },
            CouponRecord {
                code: "SAVE100".to_string(),
                kind: CouponRecordKind::Flat,
                value: 100.0,
                min_order_amount: 200.0,
                category_scope: None,
            },
        ];
        Arc::new(InMemoryCouponCatalog::from_records(records).unwrap())
    }

    fn session() -> CheckoutSession {
        CheckoutSession::new(
            catalog(),
            TaxPolicy::SingleRate(TaxRate::from_bps(500)),
            TaxableBase::PostDiscount,
        )
    }

    #[test]
    fn test_stage_transitions() {
        let mut session = session();
        assert_eq!(session.stage(), OrderStage::Building);

        session
            .add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000))
            .unwrap();
        session.apply_coupon("TEA5").unwrap();
        assert_eq!(session.stage(), OrderStage::Discounted);

        session.remove_coupon().unwrap();
        assert_eq!(session.stage(), OrderStage::Building);

        session.finalize(PaymentMethod::Cash).unwrap();
        assert_eq!(session.stage(), OrderStage::Finalized);
    }

    #[test]
    fn test_finalize_clears_cart_and_closes_session() {
        let mut session = session();
        session
            .add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000))
            .unwrap();

        let order = session.finalize(PaymentMethod::Upi).unwrap();
        assert_eq!(order.total.paise(), 9450); // ₹90 + 5%

        assert!(session.cart().is_empty());
        assert!(matches!(
            session.add_item("coffee", "Coffee", Money::from_paise(2500)),
            Err(CheckoutError::SessionFinalized)
        ));
        assert!(matches!(
            session.finalize(PaymentMethod::Cash),
            Err(CheckoutError::SessionFinalized)
        ));
    }

    #[test]
    fn test_finalize_empty_cart_keeps_session_open() {
        let mut session = session();
        let result = session.finalize(PaymentMethod::Cash);
        assert!(matches!(
            result,
            Err(CheckoutError::Core(CoreError::EmptyCart))
        ));

        // Session still usable for correction
        session
            .add_item("coffee", "Coffee", Money::from_paise(2500))
            .unwrap();
        assert!(session.finalize(PaymentMethod::Cash).is_ok());
    }

    #[test]
    fn test_failed_coupon_keeps_previous_state() {
        let mut session = session();
        session
            .add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000))
            .unwrap();
        session.apply_coupon("TEA5").unwrap();

        // Unknown code: previous coupon stays attached, pricing unchanged
        assert!(session.apply_coupon("BOGUS").is_err());
        assert_eq!(
            session.cart().applied_coupon().unwrap().coupon.code,
            "TEA5"
        );

        // Below minimum: same
        assert!(session.apply_coupon("SAVE100").is_err());
        assert_eq!(
            session.cart().applied_coupon().unwrap().coupon.code,
            "TEA5"
        );
    }

    #[test]
    fn test_coupon_snapshot_refreshes_on_mutation() {
        let mut session = session();
        session
            .add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000))
            .unwrap();
        session.apply_coupon("TEA5").unwrap();

        session
            .add_item("coffee", "Filter Coffee", Money::from_paise(2500))
            .unwrap();

        // Flat ₹5 stays ₹5, but the snapshot was recomputed against ₹115
        let applied = session.cart().applied_coupon().unwrap();
        assert_eq!(applied.discount_amount.paise(), 500);
        assert_eq!(session.totals().subtotal.paise(), 11500);
    }

    #[test]
    fn test_coupon_auto_detaches_below_minimum() {
        let mut session = session();
        session
            .add_item("thali", "Special Thali", Money::from_paise(10000))
            .unwrap();
        session
            .add_item("thali", "Special Thali", Money::from_paise(10000))
            .unwrap();
        session.apply_coupon("SAVE100").unwrap();
        assert_eq!(session.stage(), OrderStage::Discounted);

        // Drop to ₹100, below the ₹200 minimum
        session.change_quantity("thali", -1).unwrap();

        assert!(session.cart().applied_coupon().is_none());
        assert_eq!(session.stage(), OrderStage::Building);
        let totals = session.totals();
        assert!(totals.discount.is_zero());
        assert_eq!(totals.total.paise(), 10500);
    }

    #[test]
    fn test_change_quantity_for_absent_item_is_noop() {
        let mut session = session();
        session
            .add_item("coffee", "Coffee", Money::from_paise(2500))
            .unwrap();

        // No error surfaced, cart unchanged
        session.change_quantity("ghost", 2).unwrap();
        assert_eq!(session.cart().line_count(), 1);
        assert_eq!(session.totals().subtotal.paise(), 2500);
    }
}
