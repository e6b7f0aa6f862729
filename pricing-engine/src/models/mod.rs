//! Domain models for the pricing engine.

mod discount;
mod fee;
mod line_item;
mod quote;
mod tax_policy;
mod totals;

pub use discount::DiscountRule;
pub use fee::{Fee, FeeSet};
pub use line_item::{LineItem, LineItemKind};
pub use quote::{Quote, QuoteStatus};
pub use tax_policy::TaxPolicy;
pub use totals::Totals;
