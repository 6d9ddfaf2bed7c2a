//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The billing screens this engine replaces priced orders exactly that   │
//! │  way: `subtotal * 0.025` per GST line, on IEEE doubles.                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹140.00 is 14000 paise. Every percentage is applied in integer      │
//! │    arithmetic and rounded to the paisa exactly once, half up.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dhaba_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(9000); // ₹90.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // ₹180.00
//! let total = price + Money::from_paise(2500);  // ₹115.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(90.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::tax::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction must be closed even though the engine
///   never exposes a negative payable amount
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// MenuItem price ──► CartLine.unit_price ──► line total ──► subtotal
///                                                              │
///          coupon discount ◄── resolver ◄─────────────────────┤
///          tax lines       ◄── tax policy ◄───────────────────┤
///                                                              ▼
///                              subtotal - discount + tax = total payable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    ///
    /// let price = Money::from_paise(9000); // Represents ₹90.00
    /// assert_eq!(price.paise(), 9000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    ///
    /// let price = Money::from_rupees(90, 50); // ₹90.50
    /// assert_eq!(price.paise(), 9050);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Takes a percentage share of this amount, in basis points,
    /// rounded to the nearest paisa with halves rounding up.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP, ONCE                                                │
    /// │                                                                     │
    /// │  share = (amount × bps + 5000) / 10000   (integer division)        │
    /// │                                                                     │
    /// │  ₹140.00 × 10.00%  = 1400.0 p  → ₹14.00                            │
    /// │  ₹135.00 ×  5.00%  =  675.0 p  → ₹6.75                             │
    /// │  ₹10.00  ×  8.25%  =   82.5 p  → ₹0.83  (half rounds up)           │
    /// │                                                                     │
    /// │  Every producer of a Money value rounds exactly once; downstream   │
    /// │  totalization is pure integer addition.                            │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    ///
    /// let subtotal = Money::from_paise(14000); // ₹140.00
    /// assert_eq!(subtotal.percent_share(1000).paise(), 1400); // 10% → ₹14.00
    /// ```
    pub fn percent_share(&self, bps: u32) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let share = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(share as i64)
    }

    /// Calculates tax owed on this amount at the given rate.
    ///
    /// One tax line = one rounding. Split-rate policies call this once per
    /// component rate, each against the same base.
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    /// use dhaba_core::tax::TaxRate;
    ///
    /// let base = Money::from_paise(13500);  // ₹135.00
    /// let rate = TaxRate::from_bps(500);    // 5%
    /// assert_eq!(base.calculate_tax(rate).paise(), 675); // ₹6.75
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percent_share(rate.bps())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(2500); // Coffee ₹25.00
    /// assert_eq!(unit_price.multiply_quantity(2).paise(), 5000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and debugging. The frontend formats its own
/// currency strings for localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over an iterator of Money (cart subtotals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
