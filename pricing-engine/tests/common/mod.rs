//! Shared helpers for pricing-engine tests.
#![allow(dead_code)]

use pricing_engine::models::{LineItem, LineItemKind};
use pricing_engine::{Currency, Money};

pub fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::Usd)
}

/// Taxable labor line with quantity 1.
pub fn labor(description: &str, unit_price_cents: i64) -> LineItem {
    LineItem::labor(description, usd(unit_price_cents))
}

/// Taxable parts line with quantity 1.
pub fn part(description: &str, unit_price_cents: i64) -> LineItem {
    LineItem::part(description, usd(unit_price_cents))
}

pub fn item(
    kind: LineItemKind,
    description: &str,
    quantity: i64,
    unit_price_cents: i64,
    taxable: bool,
) -> LineItem {
    LineItem::new(kind, description, quantity, usd(unit_price_cents), taxable)
}
