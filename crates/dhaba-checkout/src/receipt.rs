//! # Receipt Builder
//!
//! Assembles the printed/emailed receipt from a finalized order.
//!
//! ## Receipt Contract
//! Line-itemized, at minimum: item name, quantity, unit price, line total;
//! subtotal; discount (with coupon code if any); each tax line with its
//! rate and amount; grand total; payment method.
//!
//! ```text
//!            Dhaba Dev Kitchen
//!               12 MG Road
//!            Bengaluru 560001
//! ------------------------------------------
//! Order: ORD-20240312-8F41C2D0
//! Paid:  UPI
//! ------------------------------------------
//! Masala Dosa
//!   1 x ₹90.00                       ₹90.00
//! Filter Coffee
//!   2 x ₹25.00                       ₹50.00
//! ------------------------------------------
//! Subtotal                          ₹140.00
//! Discount (TEA5)                    -₹5.00
//! GST @ 5%                            ₹6.75
//! ------------------------------------------
//! TOTAL                             ₹141.75
//! ```
//!
//! The document itself is plain data: a persistence sink can ship it as
//! JSON for emailed receipts, while [`ReceiptDocument::render`] produces
//! fixed-width text for thermal printers.

use serde::{Deserialize, Serialize};

use dhaba_core::{FinalizedOrder, Money, PaymentMethod, TaxLine};

use crate::config::CheckoutConfig;

// =============================================================================
// Receipt Document
// =============================================================================

/// One printed line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// The full receipt, ready for rendering or serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDocument {
    pub store_name: String,
    pub store_address: Vec<String>,
    pub order_number: String,
    pub timestamp: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub coupon_code: Option<String>,
    pub tax_lines: Vec<TaxLine>,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl ReceiptDocument {
    /// Builds the receipt from a finalized order and store configuration.
    pub fn build(order: &FinalizedOrder, config: &CheckoutConfig) -> Self {
        ReceiptDocument {
            store_name: config.store_name.clone(),
            store_address: config.store_address.clone(),
            order_number: order.order_number.clone(),
            timestamp: order.finalized_at.to_rfc3339(),
            lines: order
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total(),
                })
                .collect(),
            subtotal: order.subtotal,
            discount: order.discount,
            coupon_code: order.coupon_code.clone(),
            tax_lines: order.tax.lines.clone(),
            total: order.total,
            payment_method: order.payment_method,
        }
    }

    /// Renders fixed-width printer text at the given paper width.
    pub fn render(&self, width: usize) -> String {
        let mut out = String::new();
        let rule = "-".repeat(width);

        out.push_str(&center(&self.store_name, width));
        for line in &self.store_address {
            out.push_str(&center(line, width));
        }
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&format!("Order: {}\n", self.order_number));
        out.push_str(&format!("Date:  {}\n", self.timestamp));
        out.push_str(&format!("Paid:  {}\n", self.payment_method));
        out.push_str(&rule);
        out.push('\n');

        for line in &self.lines {
            out.push_str(&line.name);
            out.push('\n');
            out.push_str(&row(
                &format!("  {} x {}", line.quantity, line.unit_price),
                &line.line_total.to_string(),
                width,
            ));
        }
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&row("Subtotal", &self.subtotal.to_string(), width));

        if self.discount.is_positive() {
            let label = match &self.coupon_code {
                Some(code) => format!("Discount ({})", code),
                None => "Discount".to_string(),
            };
            out.push_str(&row(&label, &format!("-{}", self.discount), width));
        }

        for tax in &self.tax_lines {
            let label = format!("{} @ {}%", tax.label, tax.rate.percentage());
            out.push_str(&row(&label, &tax.amount.to_string(), width));
        }
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&row("TOTAL", &self.total.to_string(), width));
        out
    }
}

// =============================================================================
// Layout Helpers
// =============================================================================

/// Centers `text` within `width` characters (best effort for long text).
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}\n", " ".repeat(pad), text)
}

/// Left text, right-aligned amount, padded to `width` characters.
fn row(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let pad = width.saturating_sub(used).max(1);
    format!("{}{}{}\n", left, " ".repeat(pad), right)
}

// =============================================================================
// Unit Tests
// =============================================================================
