//! Discount rule model.

use pricing_core::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount applied to a quote's subtotal.
///
/// A zero-valued rule is a tolerated no-op. Range checks happen in the
/// totals calculator: percentage within 0..=100, fixed value non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DiscountRule {
    /// Fixed amount off the subtotal, capped at the subtotal.
    Fixed(Money),
    /// Percentage of the subtotal.
    Percentage(Decimal),
}

impl DiscountRule {
    /// No-op discount.
    pub fn none() -> Self {
        DiscountRule::Percentage(Decimal::ZERO)
    }

    pub fn is_noop(&self) -> bool {
        match self {
            DiscountRule::Fixed(amount) => amount.is_zero(),
            DiscountRule::Percentage(pct) => pct.is_zero(),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            DiscountRule::Fixed(_) => "fixed",
            DiscountRule::Percentage(_) => "percentage",
        }
    }
}
