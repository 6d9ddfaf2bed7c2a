//! # dhaba-core: Pure Billing Logic for Dhaba POS
//!
//! This crate is the **heart** of the Dhaba POS billing engine. It turns a
//! set of selected items into a priced, discounted, taxed, final payable
//! amount, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dhaba Billing Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               POS / Dashboard Screens (JS/TS)                   │   │
//! │  │    Menu grid ──► Cart panel ──► Coupon modal ──► Bill panel    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  dhaba-checkout (orchestration)                 │   │
//! │  │    CheckoutSession, config, catalog adapter, receipt, sinks    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dhaba-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  coupon   │  │    tax    │  │   │
//! │  │   │   Money   │  │   Cart    │  │ resolve() │  │ TaxPolicy │  │   │
//! │  │   │ ₹ paise   │  │ CartLine  │  │  Coupon   │  │ Breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                 ┌───────────────────────────┐                  │   │
//! │  │                 │          order            │                  │   │
//! │  │                 │ totalize() · finalize()   │                  │   │
//! │  │                 └───────────────────────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO PRINTER • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`cart`] - Cart store: lines, quantities, subtotal
//! - [`coupon`] - Coupon resolver against the external catalog
//! - [`tax`] - Tax calculator: single/split rates, explicit taxable base
//! - [`order`] - Totalizer and finalizer
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every pricing computation is deterministic
//! 2. **No I/O**: printing, persistence, catalogs live behind caller-owned
//!    boundaries in the checkout crate
//! 3. **Integer Money**: all monetary values are paise (i64); percentages
//!    round half-up to the paisa exactly once, at the producer
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dhaba_core::cart::Cart;
//! use dhaba_core::money::Money;
//! use dhaba_core::order::totalize;
//! use dhaba_core::tax::{TaxPolicy, TaxRate, TaxableBase};
//!
//! let mut cart = Cart::new();
//! cart.add_item("masala-dosa", "Masala Dosa", Money::from_paise(9000));
//!
//! let policy = TaxPolicy::SingleRate(TaxRate::from_bps(500)); // 5% GST
//! let totals = totalize(&cart, &policy, TaxableBase::PostDiscount);
//!
//! // ₹90.00 + 5% = ₹94.50
//! assert_eq!(totals.total.paise(), 9450);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod order;
pub mod tax;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dhaba_core::Money` instead of
// `use dhaba_core::money::Money`

pub use cart::{Cart, CartLine};
pub use coupon::{resolve, AppliedCoupon, Coupon, CouponCatalog, CouponKind};
pub use error::{CoreError, CoreResult, CouponError, ValidationError};
pub use money::Money;
pub use order::{
    finalize, total_payable, totalize, FinalizedOrder, OrderStage, OrderTotals, PaymentMethod,
};
pub use tax::{TaxBreakdown, TaxLine, TaxPolicy, TaxRate, TaxableBase};
