//! Totals calculator.
//!
//! The single place subtotal, discount, tax, and fees are combined. Fees
//! live in a [`FeeSet`], never as line items, so they cannot drift into the
//! tax base; the discount is split proportionally between the taxable and
//! non-taxable subtotals.

use pricing_core::{Currency, Money, PricingError};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::models::{DiscountRule, FeeSet, LineItem, TaxPolicy, Totals};

/// Deterministic, auditable totals computation.
pub struct TotalsCalculator;

impl TotalsCalculator {
    /// Compute a fresh [`Totals`] from a finalized input set.
    ///
    /// Inputs are borrowed immutably and validated up front; nonsensical
    /// authoritative data is rejected with the offending field named, never
    /// clamped. All rounding is half-up to the minor unit, applied once per
    /// aggregate quantity.
    #[instrument(skip_all, fields(line_items = line_items.len()))]
    pub fn compute(
        line_items: &[LineItem],
        discount: &DiscountRule,
        tax: &TaxPolicy,
        fees: &FeeSet,
    ) -> Result<Totals, PricingError> {
        let currency = Self::validate(line_items, discount, tax, fees)?;

        let mut subtotal = Money::zero(currency);
        let mut taxable_subtotal = Money::zero(currency);
        for item in line_items {
            let extended = item.extended_price()?;
            subtotal = subtotal.checked_add(extended)?;
            if item.taxable {
                taxable_subtotal = taxable_subtotal.checked_add(extended)?;
            }
        }

        let discount_amount = match discount {
            DiscountRule::Fixed(value) => value.min(subtotal)?,
            DiscountRule::Percentage(pct) => {
                subtotal.mul_decimal_round(*pct / Decimal::ONE_HUNDRED)?
            }
        };

        // Discount is split between taxable and non-taxable subtotals by
        // their share of the subtotal; the non-taxable side takes the
        // remainder so the two always sum exactly to the discount.
        let taxable_discount = discount_amount.proportion(taxable_subtotal, subtotal)?;
        let taxable_base_after_discount = taxable_subtotal.checked_sub(taxable_discount)?;

        let tax_amount =
            taxable_base_after_discount.mul_decimal_round(tax.rate_percent / Decimal::ONE_HUNDRED)?;

        // Fees are post-tax: never discounted, never taxed.
        let fees_total = fees.total(currency)?;

        let grand_total = subtotal
            .checked_sub(discount_amount)?
            .checked_add(tax_amount)?
            .checked_add(fees_total)?;

        debug!(
            %subtotal,
            %discount_amount,
            %tax_amount,
            %fees_total,
            %grand_total,
            "Totals computed"
        );

        Ok(Totals {
            subtotal,
            discount_amount,
            taxable_base_after_discount,
            tax_amount,
            fees_total,
            grand_total,
        })
    }

    /// Reject invalid inputs and settle on the computation currency.
    fn validate(
        line_items: &[LineItem],
        discount: &DiscountRule,
        tax: &TaxPolicy,
        fees: &FeeSet,
    ) -> Result<Currency, PricingError> {
        let currency = line_items
            .first()
            .map(|item| item.unit_price.currency())
            .or_else(|| match discount {
                DiscountRule::Fixed(value) => Some(value.currency()),
                DiscountRule::Percentage(_) => None,
            })
            .or_else(|| fees.iter().next().map(|fee| fee.amount.currency()))
            .unwrap_or(Currency::Usd);

        for item in line_items {
            if item.quantity < 1 {
                return Err(PricingError::invalid_input(
                    "line_item.quantity",
                    format!("must be at least 1, got {}", item.quantity),
                ));
            }
            if item.unit_price.is_negative() {
                return Err(PricingError::invalid_input(
                    "line_item.unit_price",
                    format!("must not be negative, got {}", item.unit_price),
                ));
            }
            if item.unit_price.currency() != currency {
                return Err(PricingError::CurrencyMismatch {
                    left: currency.as_str(),
                    right: item.unit_price.currency().as_str(),
                });
            }
        }

        match discount {
            DiscountRule::Fixed(value) => {
                if value.is_negative() {
                    return Err(PricingError::invalid_input(
                        "discount.value",
                        format!("must not be negative, got {}", value),
                    ));
                }
                if value.currency() != currency {
                    return Err(PricingError::CurrencyMismatch {
                        left: currency.as_str(),
                        right: value.currency().as_str(),
                    });
                }
            }
            DiscountRule::Percentage(pct) => {
                if *pct < Decimal::ZERO || *pct > Decimal::ONE_HUNDRED {
                    return Err(PricingError::invalid_input(
                        "discount.percentage",
                        format!("must be within 0..=100, got {}", pct),
                    ));
                }
            }
        }

        if tax.rate_percent < Decimal::ZERO {
            return Err(PricingError::invalid_input(
                "tax.rate_percent",
                format!("must not be negative, got {}", tax.rate_percent),
            ));
        }

        for fee in fees.iter() {
            if fee.amount.is_negative() {
                return Err(PricingError::invalid_input(
                    "fee.amount",
                    format!("fee '{}' must not be negative, got {}", fee.label, fee.amount),
                ));
            }
            if fee.amount.currency() != currency {
                return Err(PricingError::CurrencyMismatch {
                    left: currency.as_str(),
                    right: fee.amount.currency().as_str(),
                });
            }
        }

        Ok(currency)
    }
}
