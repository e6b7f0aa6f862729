//! Tax policy model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales tax applied to the taxable portion of the post-discount subtotal.
///
/// Fees are outside the tax base by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    pub rate_percent: Decimal,
}

impl TaxPolicy {
    pub fn new(rate_percent: Decimal) -> Self {
        Self { rate_percent }
    }

    /// 0% rate; no tax collected.
    pub fn exempt() -> Self {
        Self {
            rate_percent: Decimal::ZERO,
        }
    }
}
