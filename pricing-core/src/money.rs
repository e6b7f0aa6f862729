//! Fixed-point currency values.
//!
//! A [`Money`] is an integer count of minor currency units (cents) plus a
//! currency code. All arithmetic is checked integer arithmetic; fractional
//! factors are applied through [`Decimal`] with a single half-up rounding
//! back to the minor unit. Floating point never enters money computation;
//! decimal display conversion happens only at formatting boundaries.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PricingError;

/// ISO 4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "CAD" => Currency::Cad,
            _ => Currency::Usd,
        }
    }

    /// Minor units per major unit. 2-decimal currencies only.
    pub fn minor_per_major(&self) -> i64 {
        100
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd | Currency::Cad => "$",
            Currency::Eur => "\u{20ac}",
            Currency::Gbp => "\u{a3}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monetary amount in integer minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    pub fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self { cents: 0, currency }
    }

    /// Build from a major-unit amount, rounding half-up to the minor unit.
    pub fn from_major(amount: Decimal, currency: Currency) -> Result<Self, PricingError> {
        let cents = (amount * Decimal::from(currency.minor_per_major()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, currency })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), PricingError> {
        if self.currency != other.currency {
            return Err(PricingError::CurrencyMismatch {
                left: self.currency.as_str(),
                right: other.currency.as_str(),
            });
        }
        Ok(())
    }

    pub fn checked_add(self, other: Money) -> Result<Money, PricingError> {
        self.ensure_same_currency(&other)?;
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, ..self })
    }

    pub fn checked_sub(self, other: Money) -> Result<Money, PricingError> {
        self.ensure_same_currency(&other)?;
        let cents = self
            .cents
            .checked_sub(other.cents)
            .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, ..self })
    }

    pub fn mul_quantity(self, quantity: i64) -> Result<Money, PricingError> {
        let cents = self
            .cents
            .checked_mul(quantity)
            .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, ..self })
    }

    /// Multiply by a decimal factor, rounding half-up to the minor unit.
    ///
    /// The single rounding point for fractional money math: factors are
    /// applied to the exact integer amount and rounded once.
    pub fn mul_decimal_round(self, factor: Decimal) -> Result<Money, PricingError> {
        let cents = (Decimal::from(self.cents) * factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, ..self })
    }

    /// Multiply by a decimal factor, rounding half-up to the whole major
    /// unit. Estimates are quoted in whole dollars; invoices are not.
    pub fn mul_decimal_round_major(self, factor: Decimal) -> Result<Money, PricingError> {
        let major = (self.to_decimal() * factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self::from_major(major, self.currency)
    }

    /// The share of `self` proportional to `part / whole`, rounded half-up.
    /// Zero when `whole` is zero.
    pub fn proportion(self, part: Money, whole: Money) -> Result<Money, PricingError> {
        self.ensure_same_currency(&part)?;
        self.ensure_same_currency(&whole)?;
        if whole.cents == 0 {
            return Ok(Money::zero(self.currency));
        }
        let cents = (Decimal::from(self.cents) * Decimal::from(part.cents)
            / Decimal::from(whole.cents))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountOverflow)?;
        Ok(Self { cents, ..self })
    }

    /// The smaller of two same-currency amounts.
    pub fn min(self, other: Money) -> Result<Money, PricingError> {
        self.ensure_same_currency(&other)?;
        Ok(if self.cents <= other.cents { self } else { other })
    }

    /// Exact major-unit value, for display and reporting boundaries.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.cents) / Decimal::from(self.currency.minor_per_major())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / 100,
            abs % 100
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::Usd)
    }

    #[test]
    fn checked_add_and_sub() {
        let a = usd(150_00);
        let b = usd(89_99);
        assert_eq!(a.checked_add(b).unwrap(), usd(239_99));
        assert_eq!(a.checked_sub(b).unwrap(), usd(60_01));
    }

    #[test]
    fn add_rejects_mixed_currencies() {
        let err = usd(100)
            .checked_add(Money::new(100, Currency::Eur))
            .unwrap_err();
        assert!(matches!(err, PricingError::CurrencyMismatch { .. }));
    }

    #[test]
    fn add_overflow_is_an_error() {
        let err = usd(i64::MAX).checked_add(usd(1)).unwrap_err();
        assert!(matches!(err, PricingError::AmountOverflow));
    }

    #[test]
    fn mul_decimal_rounds_half_up_to_cent() {
        // $239.99 * 10% = $24.00 after half-up rounding of 23.999
        assert_eq!(usd(239_99).mul_decimal_round(dec!(0.10)).unwrap(), usd(24_00));
        // exact midpoint rounds up
        assert_eq!(usd(1_01).mul_decimal_round(dec!(0.5)).unwrap(), usd(51));
    }

    #[test]
    fn mul_decimal_round_major_quotes_whole_dollars() {
        // $45 * 1.5 = 67.5 -> $68
        assert_eq!(
            usd(45_00).mul_decimal_round_major(dec!(1.5)).unwrap(),
            usd(68_00)
        );
    }

    #[test]
    fn proportion_splits_by_share() {
        // $24.00 discount allocated by $239.99 / $239.99 stays whole
        let discount = usd(24_00);
        assert_eq!(
            discount.proportion(usd(239_99), usd(239_99)).unwrap(),
            discount
        );
        // zero whole allocates nothing
        assert_eq!(
            discount.proportion(usd(0), usd(0)).unwrap(),
            Money::zero(Currency::Usd)
        );
    }

    #[test]
    fn from_major_and_back() {
        let m = Money::from_major(dec!(89.99), Currency::Usd).unwrap();
        assert_eq!(m.cents(), 89_99);
        assert_eq!(m.to_decimal(), dec!(89.99));
    }

    #[test]
    fn display_formats_minor_units() {
        assert_eq!(usd(68_00).to_string(), "$68.00");
        assert_eq!(usd(-50).to_string(), "-$0.50");
        assert_eq!(Money::new(9_05, Currency::Gbp).to_string(), "\u{a3}9.05");
    }
}
