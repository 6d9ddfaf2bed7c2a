//! # Checkout Configuration
//!
//! Deployment configuration for the checkout layer.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DHABA_*`)
//! 2. Config file supplied by the host application (serde)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//!
//! ## The Taxable-Base Knob
//! The screens this engine replaced disagreed on whether GST applies before
//! or after the coupon discount. That choice is a deployment decision made
//! here, once, explicitly, not something each screen re-guesses.

use serde::{Deserialize, Serialize};

use dhaba_core::{Money, TaxPolicy, TaxRate, TaxableBase};

use crate::error::ConfigError;

// =============================================================================
// Tax Configuration (wire shape)
// =============================================================================

/// Tax regime as it arrives from deployment/catalog configuration:
/// `{"mode": "single"|"split", "rates": [..]}` with rates in percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    pub mode: TaxConfigMode,
    pub rates: Vec<f64>,
}

/// Wire values for the tax mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxConfigMode {
    /// One GST percentage applied once.
    Single,
    /// CGST + SGST, two rates off the same base.
    Split,
}

impl TaxConfig {
    /// A single-rate regime (e.g. 5% GST).
    pub fn single(rate_pct: f64) -> Self {
        TaxConfig {
            mode: TaxConfigMode::Single,
            rates: vec![rate_pct],
        }
    }

    /// A split regime (e.g. 2.5% CGST + 2.5% SGST).
    pub fn split(first_pct: f64, second_pct: f64) -> Self {
        TaxConfig {
            mode: TaxConfigMode::Split,
            rates: vec![first_pct, second_pct],
        }
    }

    /// Validates and converts the wire shape into a domain [`TaxPolicy`].
    ///
    /// ## Errors
    /// - `RateCount`: single mode with ≠ 1 rate, split mode with ≠ 2 rates
    /// - `RateOutOfRange`: any rate outside 0–100%
    pub fn policy(&self) -> Result<TaxPolicy, ConfigError> {
        for &rate in &self.rates {
            if !(0.0..=100.0).contains(&rate) {
                return Err(ConfigError::RateOutOfRange { rate });
            }
        }

        match self.mode {
            TaxConfigMode::Single => match self.rates.as_slice() {
                [rate] => Ok(TaxPolicy::SingleRate(TaxRate::from_percentage(*rate))),
                other => Err(ConfigError::RateCount {
                    mode: "single".to_string(),
                    expected: 1,
                    actual: other.len(),
                }),
            },
            TaxConfigMode::Split => match self.rates.as_slice() {
                [first, second] => Ok(TaxPolicy::SplitRate(
                    TaxRate::from_percentage(*first),
                    TaxRate::from_percentage(*second),
                )),
                other => Err(ConfigError::RateCount {
                    mode: "split".to_string(),
                    expected: 2,
                    actual: other.len(),
                }),
            },
        }
    }
}

// =============================================================================
// Checkout Configuration
// =============================================================================

/// Deployment configuration for one terminal.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// Store name (receipt header).
    pub store_name: String,

    /// Store address lines (receipt header).
    pub store_address: Vec<String>,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Tax regime in the configuration wire shape.
    pub tax: TaxConfig,

    /// Whether tax applies to the pre- or post-discount subtotal.
    pub taxable_base: TaxableBase,

    /// Timeout for a single sink delivery (printing, persistence).
    pub sink_timeout_ms: u64,

    /// Receipt paper width in characters (typically 32, 42, or 48).
    pub paper_width: usize,
}

impl Default for CheckoutConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Dhaba Dev Kitchen"
    /// - Currency: ₹
    /// - Tax: single 5% GST on the post-discount base
    /// - Sink timeout: 5 seconds
    fn default() -> Self {
        CheckoutConfig {
            store_name: "Dhaba Dev Kitchen".to_string(),
            store_address: vec!["12 MG Road".to_string(), "Bengaluru 560001".to_string()],
            currency_symbol: "₹".to_string(),
            tax: TaxConfig::single(5.0),
            taxable_base: TaxableBase::PostDiscount,
            sink_timeout_ms: 5000,
            paper_width: 42,
        }
    }
}

impl CheckoutConfig {
    /// Creates a CheckoutConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DHABA_STORE_NAME`: override store name
    /// - `DHABA_TAXABLE_BASE`: "pre_discount" or "post_discount"
    /// - `DHABA_SINK_TIMEOUT_MS`: override sink timeout
    pub fn from_env() -> Self {
        let mut config = CheckoutConfig::default();

        if let Ok(store_name) = std::env::var("DHABA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(base) = std::env::var("DHABA_TAXABLE_BASE") {
            match base.as_str() {
                "pre_discount" => config.taxable_base = TaxableBase::PreDiscount,
                "post_discount" => config.taxable_base = TaxableBase::PostDiscount,
                _ => {}
            }
        }

        if let Ok(timeout_str) = std::env::var("DHABA_SINK_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout_str.parse::<u64>() {
                config.sink_timeout_ms = timeout_ms;
            }
        }

        config
    }

    /// Formats a Money amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use dhaba_checkout::config::CheckoutConfig;
    /// use dhaba_core::Money;
    ///
    /// let config = CheckoutConfig::default();
    /// assert_eq!(config.format_money(Money::from_paise(14175)), "₹141.75");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.rupees().abs(),
            amount.paise_part()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
