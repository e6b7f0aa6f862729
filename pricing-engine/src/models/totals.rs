//! Totals snapshot model.

use pricing_core::Money;
use serde::{Deserialize, Serialize};

/// Derived, immutable breakdown of a quote's pricing.
///
/// Produced only by the totals calculator; recomputing from the same line
/// items, discount, tax policy, and fees always yields an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub taxable_base_after_discount: Money,
    pub tax_amount: Money,
    pub fees_total: Money,
    pub grand_total: Money,
}
