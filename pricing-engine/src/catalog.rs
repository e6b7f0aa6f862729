//! Service catalog.
//!
//! Static lookup of service kinds to base labor price and nominal labor
//! hours. The table is configuration: it can come from an optional
//! `catalog` file or environment overrides, and defaults to the builtin
//! shop offerings. It is never mutated at runtime.

use config::{Config, File};
use once_cell::sync::Lazy;
use pricing_core::{Currency, Money, PricingError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Kind of the generic entry substituted for unknown service kinds.
pub const FALLBACK_KIND: &str = "other";

/// One service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: String,
    pub name: String,
    pub base_price: Money,
    pub nominal_hours: Decimal,
}

impl CatalogEntry {
    fn builtin(kind: &str, name: &str, base_price_cents: i64, nominal_hours: Decimal) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            base_price: Money::new(base_price_cents, Currency::Usd),
            nominal_hours,
        }
    }
}

/// Read-only service kind table.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
    fallback: usize,
}

impl ServiceCatalog {
    /// The builtin shop offerings.
    pub fn builtin() -> Self {
        let entries = vec![
            CatalogEntry::builtin("oil_change", "Oil Change", 45_00, dec!(0.5)),
            CatalogEntry::builtin("brake_service", "Brake Service", 200_00, dec!(2.4)),
            CatalogEntry::builtin("transmission", "Transmission Service", 350_00, dec!(4.1)),
            CatalogEntry::builtin("engine_repair", "Engine Repair", 500_00, dec!(5.9)),
            CatalogEntry::builtin("electrical", "Electrical Diagnostics", 150_00, dec!(1.8)),
            CatalogEntry::builtin("ac_service", "A/C Service", 120_00, dec!(1.4)),
            CatalogEntry::builtin("tire_service", "Tire Service", 80_00, dec!(0.9)),
            CatalogEntry::builtin("inspection", "Vehicle Inspection", 25_00, dec!(0.5)),
            CatalogEntry::builtin(FALLBACK_KIND, "Other Service", 100_00, dec!(1.2)),
        ];
        Self::from_entries(entries).expect("builtin catalog carries the fallback entry")
    }

    /// Build from explicit entries. The fallback kind must be present.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, PricingError> {
        let fallback = entries
            .iter()
            .position(|e| e.kind == FALLBACK_KIND)
            .ok_or_else(|| {
                PricingError::Config(anyhow::anyhow!(
                    "service catalog must include the '{}' fallback entry",
                    FALLBACK_KIND
                ))
            })?;
        Ok(Self { entries, fallback })
    }

    /// Process-wide read-only catalog.
    pub fn global() -> &'static ServiceCatalog {
        static GLOBAL: Lazy<ServiceCatalog> = Lazy::new(ServiceCatalog::builtin);
        &GLOBAL
    }

    /// Load from the optional `catalog` config file and `SHOP__`-prefixed
    /// environment overrides, falling back to the builtin table when no
    /// services are configured.
    pub fn load() -> Result<Self, PricingError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("catalog").required(false))
            .add_source(config::Environment::with_prefix("SHOP").separator("__"))
            .build()?;

        let raw: CatalogConfig = config.try_deserialize()?;
        Self::from_config(raw)
    }

    fn from_config(raw: CatalogConfig) -> Result<Self, PricingError> {
        if raw.services.is_empty() {
            return Ok(Self::builtin());
        }
        let currency = Currency::from_string(&raw.currency);
        let entries = raw
            .services
            .into_iter()
            .map(|s| CatalogEntry {
                kind: s.kind,
                name: s.name,
                base_price: Money::new(s.base_price_cents, currency),
                nominal_hours: s.nominal_hours,
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Look up a service kind.
    pub fn entry(&self, kind: &str) -> Result<&CatalogEntry, PricingError> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .ok_or_else(|| PricingError::UnknownService {
                kind: kind.to_string(),
            })
    }

    /// The generic entry callers substitute for unknown kinds.
    pub fn fallback_entry(&self) -> &CatalogEntry {
        &self.entries[self.fallback]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shape of the `catalog` config file.
#[derive(Debug, Deserialize)]
struct CatalogConfig {
    #[serde(default)]
    services: Vec<ServiceConfig>,
    #[serde(default = "default_currency")]
    currency: String,
}

#[derive(Debug, Deserialize)]
struct ServiceConfig {
    kind: String,
    name: String,
    base_price_cents: i64,
    nominal_hours: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}
