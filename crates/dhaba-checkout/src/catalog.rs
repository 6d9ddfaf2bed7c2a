//! # Coupon Catalog Adapter
//!
//! Turns back-office coupon records into domain coupons and serves them
//! through the read-only [`CouponCatalog`] port.
//!
//! ## Boundary Conversion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Back office record (JSON)              Domain coupon                   │
//! │  ─────────────────────────              ─────────────                   │
//! │  {                                                                      │
//! │    "code": "save10",            ──►     code: "SAVE10" (normalized)     │
//! │    "kind": "percentage",        ──►     CouponKind::Percentage          │
//! │    "value": 10,                 ──►       { rate_bps: 1000 }            │
//! │    "minOrderAmount": 299,       ──►     min_order_amount: 29900 paise   │
//! │    "categoryScope": ["snacks"]  ──►     category_scope: {…}             │
//! │  }                                                                      │
//! │                                                                         │
//! │  Major units and percentages exist ONLY here. Everything past this     │
//! │  boundary is integer paise and basis points.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use dhaba_core::coupon::normalize_code;
use dhaba_core::validation::{validate_coupon_code, validate_price_paise, validate_rate_bps};
use dhaba_core::{Coupon, CouponCatalog, CouponKind, Money, ValidationError};

// =============================================================================
// Coupon Record (wire shape)
// =============================================================================

/// One coupon as the back office ships it.
///
/// Numeric fields are major units (`value: 50` = ₹50 flat, or 50% for
/// percentage coupons). They convert to paise / basis points exactly once,
/// in [`CouponRecord::into_coupon`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    pub code: String,
    pub kind: CouponRecordKind,
    pub value: f64,
    #[serde(default)]
    pub min_order_amount: f64,
    #[serde(default)]
    pub category_scope: Option<Vec<String>>,
}

/// Wire values for the coupon kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponRecordKind {
    Flat,
    Percentage,
}

impl CouponRecord {
    /// Validates the record and converts it into a domain [`Coupon`].
    ///
    /// ## Errors
    /// - blank or malformed code
    /// - negative flat amount or minimum order amount
    /// - percentage outside 0–100
    pub fn into_coupon(self) -> Result<Coupon, ValidationError> {
        validate_coupon_code(&self.code)?;

        let kind = match self.kind {
            CouponRecordKind::Flat => {
                let paise = to_paise(self.value);
                validate_price_paise(paise)?;
                CouponKind::Flat(Money::from_paise(paise))
            }
            CouponRecordKind::Percentage => {
                let bps = (self.value * 100.0).round() as i64;
                if !(0..=10000).contains(&bps) {
                    return Err(ValidationError::OutOfRange {
                        field: "percentage".to_string(),
                        min: 0,
                        max: 100,
                    });
                }
                validate_rate_bps(bps as u32)?;
                CouponKind::Percentage {
                    rate_bps: bps as u32,
                }
            }
        };

        let min_paise = to_paise(self.min_order_amount);
        validate_price_paise(min_paise)?;

        let category_scope = self
            .category_scope
            .map(|scope| scope.into_iter().collect::<BTreeSet<_>>());

        Ok(Coupon::new(
            &self.code,
            kind,
            Money::from_paise(min_paise),
            category_scope,
        ))
    }
}

/// Major units → paise, rounded to the nearest paisa.
fn to_paise(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A [`CouponCatalog`] backed by a map, keyed by normalized code.
///
/// This is the shape the session consumes for one checkout: the host
/// application fetches the active coupons once and hands them over; the
/// engine never caches beyond that.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponCatalog {
    coupons: HashMap<String, Coupon>,
}

impl InMemoryCouponCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from back-office records, validating each one.
    pub fn from_records(records: Vec<CouponRecord>) -> Result<Self, ValidationError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record.into_coupon()?);
        }
        Ok(catalog)
    }

    /// Inserts a coupon, replacing any previous entry with the same code.
    pub fn insert(&mut self, coupon: Coupon) {
        self.coupons.insert(coupon.code.clone(), coupon);
    }

    /// Number of coupons in the catalog.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Checks if the catalog has no coupons.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl CouponCatalog for InMemoryCouponCatalog {
    fn lookup(&self, code: &str) -> Option<Coupon> {
        // Keys are stored normalized; normalize again so direct callers get
        // the same case-insensitive contract the resolver has
        self.coupons.get(&normalize_code(code)).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_record_converts_to_paise() {
        let record = CouponRecord {
            code: "FLAT50".to_string(),
            kind: CouponRecordKind::Flat,
            value: 50.0,
            min_order_amount: 0.0,
            category_scope: None,
        };

        let coupon = record.into_coupon().unwrap();
        assert_eq!(coupon.kind, CouponKind::Flat(Money::from_paise(5000)));
        assert!(coupon.min_order_amount.is_zero());
    }

    #[test]
    fn test_percentage_record_converts_to_bps() {
        let record = CouponRecord {
            code: "save10".to_string(),
            kind: CouponRecordKind::Percentage,
            value: 10.0,
            min_order_amount: 299.0,
            category_scope: None,
        };

        let coupon = record.into_coupon().unwrap();
        assert_eq!(coupon.code, "SAVE10"); // normalized
        assert_eq!(coupon.kind, CouponKind::Percentage { rate_bps: 1000 });
        assert_eq!(coupon.min_order_amount.paise(), 29900);
    }

    #[test]
    fn test_record_parses_wire_json() {
        // The exact shape the back office ships
        let json = r#"{
            "code": "SAVE100",
            "kind": "flat",
            "value": 100,
            "minOrderAmount": 200,
            "categoryScope": ["snacks", "beverages"]
        }"#;

        let record: CouponRecord = serde_json::from_str(json).unwrap();
        let coupon = record.into_coupon().unwrap();

        assert_eq!(coupon.kind, CouponKind::Flat(Money::from_paise(10000)));
        assert_eq!(coupon.min_order_amount.paise(), 20000);
        let scope = coupon.category_scope.unwrap();
        assert!(scope.contains("snacks"));
        assert!(scope.contains("beverages"));
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let json = r#"{"code": "TEA5", "kind": "flat", "value": 5}"#;
        let record: CouponRecord = serde_json::from_str(json).unwrap();
        let coupon = record.into_coupon().unwrap();

        assert!(coupon.min_order_amount.is_zero());
        assert!(coupon.category_scope.is_none());
    }

    #[test]
    fn test_invalid_records_rejected() {
        let blank = CouponRecord {
            code: "  ".to_string(),
            kind: CouponRecordKind::Flat,
            value: 5.0,
            min_order_amount: 0.0,
            category_scope: None,
        };
        assert!(blank.into_coupon().is_err());

        let over_hundred = CouponRecord {
            code: "MEGA".to_string(),
            kind: CouponRecordKind::Percentage,
            value: 120.0,
            min_order_amount: 0.0,
            category_scope: None,
        };
        assert!(over_hundred.into_coupon().is_err());

        let negative = CouponRecord {
            code: "NEG".to_string(),
            kind: CouponRecordKind::Flat,
            value: -5.0,
            min_order_amount: 0.0,
            category_scope: None,
        };
        assert!(negative.into_coupon().is_err());
    }

    #[test]
    fn test_catalog_lookup_case_insensitive() {
        let catalog = InMemoryCouponCatalog::from_records(vec![CouponRecord {
            code: "Tea5".to_string(),
            kind: CouponRecordKind::Flat,
            value: 5.0,
            min_order_amount: 0.0,
            category_scope: None,
        }])
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("TEA5").is_some());
        assert!(catalog.lookup("tea5").is_some());
        assert!(catalog.lookup("coffee").is_none());
    }
}
