//! Fee models.

use pricing_core::{Currency, Money, PricingError};
use serde::{Deserialize, Serialize};

/// Fixed additive charge such as shop supplies or hazardous-waste disposal.
///
/// Fees are never taxed, never discounted, and are added after tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub label: String,
    pub amount: Money,
}

impl Fee {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Ordered list of fees on a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSet {
    fees: Vec<Fee>,
}

impl FeeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fee: Fee) {
        self.fees.push(fee);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fee> {
        self.fees.iter()
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// Sum of all fees in `currency`.
    pub fn total(&self, currency: Currency) -> Result<Money, PricingError> {
        let mut total = Money::zero(currency);
        for fee in &self.fees {
            total = total.checked_add(fee.amount)?;
        }
        Ok(total)
    }
}

impl From<Vec<Fee>> for FeeSet {
    fn from(fees: Vec<Fee>) -> Self {
        Self { fees }
    }
}
