//! Property tests for the totals calculator laws.

mod common;

use common::usd;
use pricing_engine::models::{DiscountRule, FeeSet, LineItem, LineItemKind, TaxPolicy};
use pricing_engine::services::TotalsCalculator;
use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

fn arb_line_item() -> impl Strategy<Value = LineItem> {
    (1..=5i64, 0..=500_00i64, any::<bool>()).prop_map(|(quantity, cents, taxable)| {
        LineItem::new(
            LineItemKind::Part,
            "generated item",
            quantity,
            usd(cents),
            taxable,
        )
    })
}

/// Tax rates 0%..15% in 0.25% steps.
fn arb_tax() -> impl Strategy<Value = TaxPolicy> {
    (0..=60i64).prop_map(|quarters| TaxPolicy::new(Decimal::new(quarters * 25, 2)))
}

proptest! {
    #[test]
    fn grand_total_is_additive(
        items in vec(arb_line_item(), 0..8),
        pct in 0..=100i64,
        tax in arb_tax(),
    ) {
        let discount = DiscountRule::Percentage(Decimal::from(pct));
        let totals =
            TotalsCalculator::compute(&items, &discount, &tax, &FeeSet::empty()).unwrap();

        let expected = totals
            .subtotal
            .checked_sub(totals.discount_amount)
            .unwrap()
            .checked_add(totals.tax_amount)
            .unwrap()
            .checked_add(totals.fees_total)
            .unwrap();
        prop_assert_eq!(totals.grand_total, expected);
    }

    #[test]
    fn discount_is_bounded_by_subtotal(
        items in vec(arb_line_item(), 0..8),
        fixed_cents in 0..=2_000_00i64,
    ) {
        let discount = DiscountRule::Fixed(usd(fixed_cents));
        let totals = TotalsCalculator::compute(
            &items,
            &discount,
            &TaxPolicy::exempt(),
            &FeeSet::empty(),
        )
        .unwrap();

        prop_assert!(totals.discount_amount.cents() >= 0);
        prop_assert!(totals.discount_amount.cents() <= totals.subtotal.cents());
    }

    #[test]
    fn no_tax_without_taxable_items(
        quantities in vec(1..=5i64, 1..6),
        tax in arb_tax(),
    ) {
        let items: Vec<LineItem> = quantities
            .into_iter()
            .map(|quantity| {
                LineItem::new(LineItemKind::Part, "untaxed", quantity, usd(17_42), false)
            })
            .collect();

        let totals =
            TotalsCalculator::compute(&items, &DiscountRule::none(), &tax, &FeeSet::empty())
                .unwrap();
        prop_assert_eq!(totals.tax_amount.cents(), 0);
    }

    #[test]
    fn computation_is_deterministic(
        items in vec(arb_line_item(), 0..8),
        pct in 0..=100i64,
        tax in arb_tax(),
    ) {
        let discount = DiscountRule::Percentage(Decimal::from(pct));
        let first =
            TotalsCalculator::compute(&items, &discount, &tax, &FeeSet::empty()).unwrap();
        let second =
            TotalsCalculator::compute(&items, &discount, &tax, &FeeSet::empty()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn taxable_base_stays_within_bounds(
        items in vec(arb_line_item(), 0..8),
        fixed_cents in 0..=2_000_00i64,
    ) {
        let discount = DiscountRule::Fixed(usd(fixed_cents));
        let totals = TotalsCalculator::compute(
            &items,
            &discount,
            &TaxPolicy::exempt(),
            &FeeSet::empty(),
        )
        .unwrap();

        let taxable_subtotal: i64 = items
            .iter()
            .filter(|item| item.taxable)
            .map(|item| item.quantity * item.unit_price.cents())
            .sum();
        prop_assert!(totals.taxable_base_after_discount.cents() >= 0);
        prop_assert!(totals.taxable_base_after_discount.cents() <= taxable_subtotal);
    }

    /// Rounding once per aggregate keeps a penny-split total within two
    /// cents of the same computation done on the aggregate amount.
    #[test]
    fn penny_splits_track_the_aggregate_computation(
        total_cents in 0..=100_000i64,
        pct in 0..=30i64,
        tax_quarters in 0..=60i64,
    ) {
        let third = total_cents / 3;
        let items = vec![
            LineItem::new(LineItemKind::Part, "a", 1, usd(third), true),
            LineItem::new(LineItemKind::Part, "b", 1, usd(third), true),
            LineItem::new(LineItemKind::Part, "c", 1, usd(total_cents - 2 * third), true),
        ];
        let discount = DiscountRule::Percentage(Decimal::from(pct));
        let tax = TaxPolicy::new(Decimal::new(tax_quarters * 25, 2));

        let totals = TotalsCalculator::compute(&items, &discount, &tax, &FeeSet::empty()).unwrap();

        let aggregate = (Decimal::from(total_cents)
            * (Decimal::ONE - Decimal::from(pct) / Decimal::ONE_HUNDRED)
            * (Decimal::ONE + tax.rate_percent / Decimal::ONE_HUNDRED))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap();

        prop_assert!(
            (totals.grand_total.cents() - aggregate).abs() <= 2,
            "grand total {} vs aggregate {}",
            totals.grand_total.cents(),
            aggregate
        );
    }
}
