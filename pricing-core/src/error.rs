use thiserror::Error;
use uuid::Uuid;

/// Engine-wide error taxonomy.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Service kind not present in the catalog. Recoverable: callers may
    /// substitute the generic fallback entry and continue.
    #[error("Unknown service kind: {kind}")]
    UnknownService { kind: String },

    /// A finalized pricing input is nonsensical. The offending field is
    /// named; no partial result is produced.
    #[error("Invalid pricing input: {field}: {reason}")]
    InvalidPricingInput { field: &'static str, reason: String },

    /// Attempted mutation of a closed quote. Signals a workflow bug in the
    /// caller, never silently ignored.
    #[error("Quote {quote_id} is finalized; pricing inputs are immutable")]
    QuoteFinalized { quote_id: Uuid },

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        left: &'static str,
        right: &'static str,
    },

    #[error("Money amount overflow")]
    AmountOverflow,

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),
}

impl PricingError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidPricingInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for PricingError {
    fn from(err: config::ConfigError) -> Self {
        PricingError::Config(anyhow::Error::new(err))
    }
}
