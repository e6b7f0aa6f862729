//! Cost estimator.
//!
//! Heuristic pre-diagnosis pricing: base labor price from the service
//! catalog, scaled by urgency, a diagnostic-uncertainty factor, and coarse
//! vehicle signals. Estimates are quoted in whole major units; the exact
//! math lives in the totals calculator once real line items exist.

use chrono::{Datelike, Utc};
use pricing_core::{Money, PricingError};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::catalog::{CatalogEntry, ServiceCatalog};
use crate::models::{Fee, FeeSet, LineItem};

const MIN_COMPLEXITY: Decimal = dec!(0.75);
const MAX_COMPLEXITY: Decimal = dec!(1.25);
const PARTS_RATIO: Decimal = dec!(0.6);
const SUPPLIES_RATE: Decimal = dec!(0.05);
const UNKNOWN_AGE_FACTOR: Decimal = dec!(1.2);
const UNKNOWN_MILEAGE_FACTOR: Decimal = dec!(1.1);
const AGE_DIVISOR: Decimal = dec!(20);
const MILEAGE_DIVISOR: Decimal = dec!(100000);
const LABOR_RATE_PER_HOUR: Decimal = dec!(85);
const MIN_HOURS: Decimal = dec!(0.5);

/// Job urgency. Scales labor pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Emergency,
}

impl Urgency {
    pub fn multiplier(&self) -> Decimal {
        match self {
            Urgency::Low => dec!(0.9),
            Urgency::Normal => dec!(1.0),
            Urgency::High => dec!(1.2),
            Urgency::Emergency => dec!(1.5),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "low" => Urgency::Low,
            "high" => Urgency::High,
            "emergency" => Urgency::Emergency,
            _ => Urgency::Normal,
        }
    }
}

/// Source of the diagnostic-uncertainty factor in [0.75, 1.25].
///
/// The one non-deterministic input in the engine. Production callers use
/// [`RandomComplexity`]; tests and "recompute this exact estimate" callers
/// inject [`FixedComplexity`]. Out-of-range values are clamped into the
/// interval, never rejected.
pub trait ComplexitySource {
    fn factor(&mut self) -> Decimal;
}

/// Uniform random factor with two decimal places.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomComplexity;

impl ComplexitySource for RandomComplexity {
    fn factor(&mut self) -> Decimal {
        // integer basis points of 0.01; money math stays float-free
        let basis: i64 = rand::thread_rng().gen_range(75..=125);
        Decimal::new(basis, 2)
    }
}

/// Fixed factor for reproducible estimates.
#[derive(Debug, Clone, Copy)]
pub struct FixedComplexity(Decimal);

impl FixedComplexity {
    pub fn new(factor: Decimal) -> Self {
        Self(factor.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY))
    }
}

impl ComplexitySource for FixedComplexity {
    fn factor(&mut self) -> Decimal {
        self.0
    }
}

/// Inputs gathered before diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub service_kind: String,
    pub vehicle_year: Option<i32>,
    pub vehicle_mileage: Option<i64>,
    pub urgency: Urgency,
}

impl EstimateRequest {
    pub fn new(service_kind: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            service_kind: service_kind.into(),
            vehicle_year: None,
            vehicle_mileage: None,
            urgency,
        }
    }

    pub fn with_vehicle(mut self, year: Option<i32>, mileage: Option<i64>) -> Self {
        self.vehicle_year = year;
        self.vehicle_mileage = mileage;
        self
    }
}

/// Draft pricing produced by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub service_name: String,
    /// Suggested labor and parts lines, both taxable, quantity 1.
    pub line_items: Vec<LineItem>,
    /// Shop-supplies fee; a fee, not a line item, so it never enters the
    /// tax base.
    pub fees: FeeSet,
    pub estimated_hours: Decimal,
    /// The factor actually applied. Feed it back through
    /// [`FixedComplexity`] to reproduce this estimate.
    pub complexity_factor: Decimal,
}

/// Heuristic cost estimator over a service catalog.
///
/// Pure function of its inputs plus the injected complexity factor; no side
/// effects, no shared state.
#[derive(Debug, Clone)]
pub struct CostEstimator<'a> {
    catalog: &'a ServiceCatalog,
    reference_year: i32,
}

impl<'a> CostEstimator<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self {
            catalog,
            reference_year: Utc::now().year(),
        }
    }

    /// Pin the year used for vehicle-age math (tests, historical replays).
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Estimate for a known service kind.
    #[instrument(skip(self, complexity), fields(service_kind = %request.service_kind, urgency = request.urgency.as_str()))]
    pub fn estimate(
        &self,
        request: &EstimateRequest,
        complexity: &mut dyn ComplexitySource,
    ) -> Result<Estimate, PricingError> {
        let entry = self.catalog.entry(&request.service_kind)?;
        self.estimate_for_entry(entry, request, complexity)
    }

    /// Estimate, substituting the generic fallback entry for unknown kinds
    /// rather than aborting.
    #[instrument(skip(self, complexity), fields(service_kind = %request.service_kind))]
    pub fn estimate_with_fallback(
        &self,
        request: &EstimateRequest,
        complexity: &mut dyn ComplexitySource,
    ) -> Result<Estimate, PricingError> {
        let entry = match self.catalog.entry(&request.service_kind) {
            Ok(entry) => entry,
            Err(PricingError::UnknownService { kind }) => {
                warn!(service_kind = %kind, "Unknown service kind, using fallback catalog entry");
                self.catalog.fallback_entry()
            }
            Err(err) => return Err(err),
        };
        self.estimate_for_entry(entry, request, complexity)
    }

    fn estimate_for_entry(
        &self,
        entry: &CatalogEntry,
        request: &EstimateRequest,
        complexity: &mut dyn ComplexitySource,
    ) -> Result<Estimate, PricingError> {
        let factor = complexity.factor().clamp(MIN_COMPLEXITY, MAX_COMPLEXITY);

        let labor = entry
            .base_price
            .mul_decimal_round_major(factor * request.urgency.multiplier())?;

        let age_factor = self.vehicle_age_factor(request.vehicle_year);
        let mileage_factor = Self::mileage_factor(request.vehicle_mileage);
        let parts = labor.mul_decimal_round_major(PARTS_RATIO * age_factor * mileage_factor)?;

        let supplies = labor
            .checked_add(parts)?
            .mul_decimal_round_major(SUPPLIES_RATE)?;

        let estimated_hours = Self::estimated_hours(labor);

        let line_items = vec![
            LineItem::labor(
                format!(
                    "{} labor ({} hours @ {}/hr)",
                    entry.name,
                    estimated_hours,
                    Money::from_major(LABOR_RATE_PER_HOUR, labor.currency())?
                ),
                labor,
            ),
            LineItem::part("Estimated parts & materials", parts),
        ];

        let fees = FeeSet::from(vec![Fee::new("Shop supplies", supplies)]);

        Ok(Estimate {
            service_name: entry.name.clone(),
            line_items,
            fees,
            estimated_hours,
            complexity_factor: factor,
        })
    }

    /// Older vehicles cost more in parts. Years outside the plausible range
    /// (non-positive, or past the next model year) are treated as unknown.
    fn vehicle_age_factor(&self, year: Option<i32>) -> Decimal {
        match year {
            Some(y) if y > 0 && y <= self.reference_year + 1 => {
                Decimal::from(self.reference_year - y) / AGE_DIVISOR + Decimal::ONE
            }
            _ => UNKNOWN_AGE_FACTOR,
        }
    }

    /// High mileage scales parts cost up; negative readings are treated as
    /// unknown.
    fn mileage_factor(mileage: Option<i64>) -> Decimal {
        match mileage {
            Some(m) if m >= 0 => (Decimal::from(m) / MILEAGE_DIVISOR).max(Decimal::ONE),
            _ => UNKNOWN_MILEAGE_FACTOR,
        }
    }

    /// Labor hours at the reference shop rate, floored at half an hour.
    fn estimated_hours(labor: Money) -> Decimal {
        (labor.to_decimal() / LABOR_RATE_PER_HOUR)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            .max(MIN_HOURS)
    }
}
