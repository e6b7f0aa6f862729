//! pricing-core: Shared money and error primitives for the pricing engine.
pub mod error;
pub mod money;

pub use error::PricingError;
pub use money::{Currency, Money};

pub use rust_decimal;
pub use serde;
