//! # Cart Store
//!
//! Holds the in-progress list of selected items for one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Screen Action            Cart Operation          State Change          │
//! │  ─────────────            ──────────────          ────────────          │
//! │                                                                         │
//! │  Tap menu item ──────────► add_item() ──────────► qty += 1 or new line │
//! │                                                                         │
//! │  Tap +/- stepper ────────► change_quantity() ───► qty += delta         │
//! │                                                    (≤ 0 removes line)   │
//! │                                                                         │
//! │  Tap trash icon ─────────► remove_item() ───────► line removed         │
//! │                                                                         │
//! │  New order ──────────────► clear() ─────────────► lines + coupon gone  │
//! │                                                                         │
//! │  Bill panel ─────────────► subtotal() ──────────► (read only, derived) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A line with quantity ≤ 0 does not exist (removed, never stored as zero)
//! - `item_id` is unique within a cart; re-adding increments quantity
//! - Insertion order is preserved for display
//! - One cart belongs to exactly one checkout session; no sharing

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::AppliedCoupon;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One selected menu item with its quantity.
///
/// ## Snapshot Pattern
/// `name` and `unit_price` are frozen copies taken when the item was added.
/// If the menu changes mid-order, the cart (and later the receipt) keeps
/// showing what the customer actually agreed to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item identifier (unique within the cart).
    pub item_id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity selected; always > 0 while the line exists.
    pub quantity: i64,
}

impl CartLine {
    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order for one checkout session.
///
/// Lines are private so the quantity and uniqueness invariants cannot be
/// bypassed; reads go through [`Cart::lines`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    coupon: Option<AppliedCoupon>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            coupon: None,
        }
    }

    /// Adds one unit of a menu item.
    ///
    /// ## Behavior
    /// - Item already has a line: quantity += 1
    /// - Otherwise: new line with quantity 1, appended at the end
    ///
    /// Always succeeds; there are no error conditions.
    pub fn add_item(&mut self, item_id: &str, name: &str, unit_price: Money) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id: item_id.to_string(),
            name: name.to_string(),
            unit_price,
            quantity: 1,
        });
    }

    /// Adjusts the quantity of an existing line by `delta`.
    ///
    /// ## Behavior
    /// - Resulting quantity ≤ 0: the line is removed entirely
    /// - Item absent: `CoreError::ItemNotFound`. Adding new lines must go
    ///   through [`Cart::add_item`]; callers may recover this as a no-op
    pub fn change_quantity(&mut self, item_id: &str, delta: i64) -> CoreResult<()> {
        let Some(index) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return Err(CoreError::ItemNotFound(item_id.to_string()));
        };

        self.lines[index].quantity += delta;
        if self.lines[index].quantity <= 0 {
            self.lines.remove(index);
        }
        Ok(())
    }

    /// Removes a line unconditionally; no-op if absent.
    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Empties the cart and detaches any applied coupon.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals; zero for an empty cart.
    ///
    /// Pure and recomputed on demand, never cached separately from the
    /// lines, so it can never disagree with them.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    // -------------------------------------------------------------------------
    // Coupon attachment
    // -------------------------------------------------------------------------

    /// Attaches a resolved coupon, replacing any previous one.
    ///
    /// Coupons never stack: the new snapshot is the only discount.
    pub fn attach_coupon(&mut self, applied: AppliedCoupon) {
        self.coupon = Some(applied);
    }

    /// Detaches the coupon, restoring the undiscounted subtotal.
    pub fn detach_coupon(&mut self) {
        self.coupon = None;
    }

    /// The currently attached coupon snapshot, if any.
    ///
    /// The snapshot is stale the instant the subtotal changes; totalization
    /// refreshes it before pricing (see [`crate::order::totalize`]).
    pub fn applied_coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::{Coupon, CouponKind};

    fn dosa() -> (&'static str, &'static str, Money) {
        ("masala-dosa", "Masala Dosa", Money::from_paise(9000))
    }

    fn coffee() -> (&'static str, &'static str, Money) {
        ("filter-coffee", "Filter Coffee", Money::from_paise(2500))
    }

    #[test]
    fn test_add_item_new_line() {
        let mut cart = Cart::new();
        let (id, name, price) = dosa();

        cart.add_item(id, name, price);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.subtotal().paise(), 9000);
    }

    #[test]
    fn test_add_item_increments_existing_line() {
        let mut cart = Cart::new();
        let (id, name, price) = coffee();

        cart.add_item(id, name, price);
        cart.add_item(id, name, price);

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal().paise(), 5000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        let (d_id, d_name, d_price) = dosa();
        let (c_id, c_name, c_price) = coffee();

        cart.add_item(d_id, d_name, d_price);
        cart.add_item(c_id, c_name, c_price);
        cart.add_item(d_id, d_name, d_price); // increments, does not reorder

        assert_eq!(cart.lines()[0].item_id, "masala-dosa");
        assert_eq!(cart.lines()[1].item_id, "filter-coffee");
    }

    #[test]
    fn test_change_quantity() {
        let mut cart = Cart::new();
        let (id, name, price) = coffee();

        cart.add_item(id, name, price);
        cart.change_quantity(id, 2).unwrap();
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.change_quantity(id, -1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let (id, name, price) = coffee();

        cart.add_item(id, name, price);
        cart.add_item(id, name, price);
        cart.change_quantity(id, -2).unwrap();

        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_remove_last_unit_equivalent_to_remove_item() {
        let (id, name, price) = dosa();

        let mut stepped = Cart::new();
        stepped.add_item(id, name, price);
        stepped.add_item(id, name, price);
        stepped.change_quantity(id, -2).unwrap();

        let mut removed = Cart::new();
        removed.add_item(id, name, price);
        removed.add_item(id, name, price);
        removed.remove_item(id);

        assert_eq!(stepped.lines(), removed.lines());
        assert_eq!(stepped.subtotal(), removed.subtotal());
    }

    #[test]
    fn test_change_quantity_absent_item() {
        let mut cart = Cart::new();
        let result = cart.change_quantity("ghost", 1);
        assert!(matches!(result, Err(CoreError::ItemNotFound(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_absent_is_noop() {
        let mut cart = Cart::new();
        let (id, name, price) = dosa();
        cart.add_item(id, name, price);

        cart.remove_item("ghost");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear_detaches_coupon() {
        let mut cart = Cart::new();
        let (id, name, price) = dosa();
        cart.add_item(id, name, price);

        let coupon = Coupon::new(
            "TEA5",
            CouponKind::Flat(Money::from_paise(500)),
            Money::zero(),
            None,
        );
        cart.attach_coupon(AppliedCoupon {
            coupon,
            discount_amount: Money::from_paise(500),
        });
        assert!(cart.applied_coupon().is_some());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.applied_coupon().is_none());
    }

    #[test]
    fn test_subtotal_empty_cart_is_zero() {
        let cart = Cart::new();
        assert!(cart.subtotal().is_zero());
    }
}
