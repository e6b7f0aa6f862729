//! Line item model.

use pricing_core::{Money, PricingError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Labor,
    Part,
    Fee,
}

impl LineItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemKind::Labor => "labor",
            LineItemKind::Part => "part",
            LineItemKind::Fee => "fee",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "part" => LineItemKind::Part,
            "fee" => LineItemKind::Fee,
            _ => LineItemKind::Labor,
        }
    }
}

/// A priced, quantified unit of labor, parts, or work on a quote.
///
/// Suggested by the estimator or entered manually; immutable once its quote
/// finalizes. Quantity and price bounds are enforced by the totals
/// calculator, which rejects rather than clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub kind: LineItemKind,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub taxable: bool,
}

impl LineItem {
    pub fn new(
        kind: LineItemKind,
        description: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        taxable: bool,
    ) -> Self {
        Self {
            line_item_id: Uuid::new_v4(),
            kind,
            description: description.into(),
            quantity,
            unit_price,
            taxable,
        }
    }

    /// Single taxable labor line.
    pub fn labor(description: impl Into<String>, unit_price: Money) -> Self {
        Self::new(LineItemKind::Labor, description, 1, unit_price, true)
    }

    /// Single taxable parts line.
    pub fn part(description: impl Into<String>, unit_price: Money) -> Self {
        Self::new(LineItemKind::Part, description, 1, unit_price, true)
    }

    /// Quantity times unit price.
    pub fn extended_price(&self) -> Result<Money, PricingError> {
        self.unit_price.mul_quantity(self.quantity)
    }
}
