//! pricing-engine: Cost estimation and invoice totals for shop management.
//!
//! Two cooperating subsystems behind one crate:
//!
//! - [`services::CostEstimator`] prices a requested service before work
//!   begins, from coarse signals (service kind, vehicle age, mileage,
//!   urgency) plus one injectable diagnostic-uncertainty factor.
//! - [`services::TotalsCalculator`] deterministically turns a finalized
//!   line-item set, discount rule, tax policy, and fee set into an
//!   auditable totals breakdown.
//!
//! [`models::Quote`] couples the two: a draft quote takes estimator output
//! or manual line items, recomputes totals on every edit, and freezes into
//! an invoice on finalize.
//!
//! The engine is pure, synchronous computation over caller-owned data. It
//! emits `tracing` events but installs no subscriber, performs no I/O, and
//! holds no mutable state beyond the read-only service catalog.

pub mod catalog;
pub mod models;
pub mod services;

pub use pricing_core::{Currency, Money, PricingError};
