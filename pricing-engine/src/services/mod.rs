//! Pricing services: cost estimation and totals computation.

pub mod estimator;
pub mod totals;

pub use estimator::{
    ComplexitySource, CostEstimator, Estimate, EstimateRequest, FixedComplexity, RandomComplexity,
    Urgency,
};
pub use totals::TotalsCalculator;
