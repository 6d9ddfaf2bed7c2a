//! # Tax Calculator
//!
//! Computes tax owed on a priced cart under a configured tax policy.
//!
//! ## Policy Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tax Policies                                    │
//! │                                                                         │
//! │  SingleRate(5%)                 SplitRate(2.5%, 2.5%)                   │
//! │  ──────────────                 ─────────────────────                   │
//! │  GST   5.00%  ₹6.75             CGST  2.50%  ₹5.00                      │
//! │                                 SGST  2.50%  ₹5.00                      │
//! │                                                                         │
//! │  Split components are INDEPENDENT: each is computed off the SAME       │
//! │  base and rounded on its own. They are never compounded.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxable Base
//! Whether tax applies before or after the coupon discount is a deployment
//! decision, not a constant. The two billing screens this engine replaces
//! disagreed on it, so the base is an explicit parameter everywhere.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 250 bps = 2.5% (e.g., one CGST/SGST half of a 5% GST regime)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Taxable Base
// =============================================================================

/// Which subtotal the tax percentages apply to.
///
/// Selected explicitly by the caller (deployment configuration). Pick one
/// per deployment and keep it consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxableBase {
    /// Tax on the subtotal before any coupon discount.
    PreDiscount,
    /// Tax on the subtotal after the coupon discount.
    PostDiscount,
}

impl TaxableBase {
    /// Selects the monetary base for tax computation.
    ///
    /// `discount` is already clamped to `subtotal` by the coupon resolver,
    /// so the post-discount base cannot go negative.
    #[inline]
    pub fn select(&self, subtotal: Money, discount: Money) -> Money {
        match self {
            TaxableBase::PreDiscount => subtotal,
            TaxableBase::PostDiscount => subtotal - discount,
        }
    }
}

// =============================================================================
// Tax Policy
// =============================================================================

/// The tax regime configured for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// One GST percentage applied once.
    SingleRate(TaxRate),
    /// CGST + SGST, each applied independently to the same base.
    SplitRate(TaxRate, TaxRate),
}

impl TaxPolicy {
    /// Computes the itemized tax breakdown for a taxable base.
    ///
    /// Each line rounds half-up to the paisa on its own; split components
    /// both read the same base (not sequentially compounded).
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_core::money::Money;
    /// use dhaba_core::tax::{TaxPolicy, TaxRate};
    ///
    /// let policy = TaxPolicy::SplitRate(TaxRate::from_bps(250), TaxRate::from_bps(250));
    /// let breakdown = policy.compute(Money::from_paise(20000)); // ₹200.00
    /// assert_eq!(breakdown.lines.len(), 2);
    /// assert_eq!(breakdown.total_tax.paise(), 1000); // ₹5.00 + ₹5.00
    /// ```
    pub fn compute(&self, base: Money) -> TaxBreakdown {
        let lines = match self {
            TaxPolicy::SingleRate(rate) => vec![TaxLine::new("GST", *rate, base)],
            TaxPolicy::SplitRate(first, second) => vec![
                TaxLine::new("CGST", *first, base),
                TaxLine::new("SGST", *second, base),
            ],
        };

        let total_tax = lines.iter().map(|line| line.amount).sum();
        TaxBreakdown { lines, total_tax }
    }
}

// =============================================================================
// Tax Breakdown
// =============================================================================

/// One named tax line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxLine {
    /// Receipt label: "GST", "CGST", "SGST".
    pub label: String,
    /// The rate this line was computed at.
    pub rate: TaxRate,
    /// Tax owed on this line, rounded to the paisa.
    pub amount: Money,
}

impl TaxLine {
    fn new(label: &str, rate: TaxRate, base: Money) -> Self {
        TaxLine {
            label: label.to_string(),
            rate,
            amount: base.calculate_tax(rate),
        }
    }
}

/// Itemized tax lines plus the total-tax scalar.
///
/// Receipts show the itemized lines; the totalizer consumes the scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxBreakdown {
    pub lines: Vec<TaxLine>,
    pub total_tax: Money,
}

impl TaxBreakdown {
    /// A breakdown with no tax lines (zero tax).
    pub fn empty() -> Self {
        TaxBreakdown {
            lines: Vec::new(),
            total_tax: Money::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(250);
        assert_eq!(rate.bps(), 250);
        assert!((rate.percentage() - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(5.0).bps(), 500);
        assert_eq!(TaxRate::from_percentage(2.5).bps(), 250);
    }

    #[test]
    fn test_single_rate_breakdown() {
        let policy = TaxPolicy::SingleRate(TaxRate::from_bps(500));
        let breakdown = policy.compute(Money::from_paise(13500));

        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.lines[0].label, "GST");
        assert_eq!(breakdown.lines[0].amount.paise(), 675);
        assert_eq!(breakdown.total_tax.paise(), 675);
    }

    #[test]
    fn test_split_rate_same_base_not_compounded() {
        let policy = TaxPolicy::SplitRate(TaxRate::from_bps(250), TaxRate::from_bps(250));
        let breakdown = policy.compute(Money::from_paise(20000));

        assert_eq!(breakdown.lines.len(), 2);
        assert_eq!(breakdown.lines[0].label, "CGST");
        assert_eq!(breakdown.lines[1].label, "SGST");
        // Each component off the SAME ₹200.00 base: ₹5.00 + ₹5.00
        assert_eq!(breakdown.lines[0].amount.paise(), 500);
        assert_eq!(breakdown.lines[1].amount.paise(), 500);
        assert_eq!(breakdown.total_tax.paise(), 1000);
    }

    #[test]
    fn test_split_rate_rounds_each_line_independently() {
        // ₹9.90 at 2.5% per line = 24.75p → 25p per line (half up, per line)
        let policy = TaxPolicy::SplitRate(TaxRate::from_bps(250), TaxRate::from_bps(250));
        let breakdown = policy.compute(Money::from_paise(990));

        assert_eq!(breakdown.lines[0].amount.paise(), 25);
        assert_eq!(breakdown.lines[1].amount.paise(), 25);
        // A compounded 5% single line would have given 50 as well, but a
        // sequential application (tax on taxed amount) would not.
        assert_eq!(breakdown.total_tax.paise(), 50);
    }

    #[test]
    fn test_taxable_base_selection() {
        let subtotal = Money::from_paise(14000);
        let discount = Money::from_paise(500);

        assert_eq!(
            TaxableBase::PreDiscount.select(subtotal, discount).paise(),
            14000
        );
        assert_eq!(
            TaxableBase::PostDiscount.select(subtotal, discount).paise(),
            13500
        );
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = TaxBreakdown::empty();
        assert!(breakdown.lines.is_empty());
        assert!(breakdown.total_tax.is_zero());
    }

    #[test]
    fn test_policy_serde_shape() {
        // The shape the frontend and config layer see
        let policy = TaxPolicy::SplitRate(TaxRate::from_bps(250), TaxRate::from_bps(250));
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, r#"{"split_rate":[250,250]}"#);

        let parsed: TaxPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, policy);

        let single: TaxPolicy = serde_json::from_str(r#"{"single_rate":500}"#).unwrap();
        assert_eq!(single, TaxPolicy::SingleRate(TaxRate::from_bps(500)));
    }
}
