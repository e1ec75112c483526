//! Bundled static answers.
//!
//! A domain that declares a [`StaticDataset`] never fails after validation:
//! when its live chain is exhausted the orchestrator answers from the table
//! instead.

use std::collections::HashMap;

use bharatai_types::provider::MarketRecord;
use bharatai_types::query::Domain;

/// An immutable table of records served when live providers are unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDataset {
    records: Vec<MarketRecord>,
}

impl StaticDataset {
    pub fn new(records: Vec<MarketRecord>) -> Self {
        Self { records }
    }

    /// Representative mandi prices (INR per quintal) for common crops.
    pub fn mandi_prices() -> Self {
        Self::new(vec![
            MarketRecord::new("Rice", "2300", "Guntur", "Guntur"),
            MarketRecord::new("Wheat", "2200", "Ludhiana", "Ludhiana"),
            MarketRecord::new("Cotton", "6100", "Warangal", "Warangal"),
            MarketRecord::new("Turmeric", "9000", "Erode", "Erode"),
        ])
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }
}

/// Static datasets keyed by domain.
#[derive(Debug, Clone, Default)]
pub struct FallbackDatasets {
    by_domain: HashMap<Domain, StaticDataset>,
}

impl FallbackDatasets {
    /// No domain has a static fallback.
    pub fn none() -> Self {
        Self::default()
    }

    /// The production set: mandi prices for `MarketData`, nothing else.
    pub fn standard() -> Self {
        Self::none().with(Domain::MarketData, StaticDataset::mandi_prices())
    }

    pub fn with(mut self, domain: Domain, dataset: StaticDataset) -> Self {
        self.by_domain.insert(domain, dataset);
        self
    }

    pub fn get(&self, domain: Domain) -> Option<&StaticDataset> {
        self.by_domain.get(&domain)
    }
}
