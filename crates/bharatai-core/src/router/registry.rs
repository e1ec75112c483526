//! Provider registry: the per-domain fallback chains.
//!
//! Built once at startup from the router configuration and shared read-only
//! (`Arc<ProviderRegistry>`) by every request afterwards.

use std::collections::HashMap;
use std::time::Duration;

use bharatai_types::error::RegistryError;
use bharatai_types::provider::ProviderSpec;
use bharatai_types::query::Domain;

use super::box_adapter::BoxProviderAdapter;

/// One chain entry: the static spec, its effective timeout and the adapter.
#[derive(Debug)]
pub struct RegisteredProvider {
    pub spec: ProviderSpec,
    pub timeout: Duration,
    pub adapter: BoxProviderAdapter,
}

impl RegisteredProvider {
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

/// Domain-indexed, priority-ordered provider chains.
///
/// Within a chain, entries are sorted by `priority` ascending with ties broken
/// by name, so iteration order is deterministic regardless of registration
/// order.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    chains: HashMap<Domain, Vec<RegisteredProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the chain named by `spec.domain`.
    ///
    /// Disabled specs are skipped. Fails if the adapter's capability cannot
    /// serve the domain, or if the chain already holds a provider with the
    /// same name.
    pub fn register(
        &mut self,
        spec: ProviderSpec,
        timeout: Duration,
        adapter: BoxProviderAdapter,
    ) -> Result<(), RegistryError> {
        if !spec.enabled {
            tracing::debug!(provider = %spec.name, domain = %spec.domain, "Provider disabled, not registered");
            return Ok(());
        }

        let domain = spec.domain;
        let capability = adapter.capability();
        if capability != domain.required_capability() {
            return Err(RegistryError::CapabilityMismatch {
                provider: spec.name,
                capability,
                domain,
            });
        }

        let chain = self.chains.entry(domain).or_default();
        if chain.iter().any(|p| p.spec.name == spec.name) {
            return Err(RegistryError::DuplicateProvider {
                provider: spec.name,
                domain,
            });
        }

        tracing::debug!(
            provider = %spec.name,
            %domain,
            priority = spec.priority,
            timeout_ms = timeout.as_millis() as u64,
            "Registered provider"
        );

        chain.push(RegisteredProvider {
            spec,
            timeout,
            adapter,
        });
        chain.sort_by(|a, b| {
            a.spec
                .priority
                .cmp(&b.spec.priority)
                .then_with(|| a.spec.name.cmp(&b.spec.name))
        });
        Ok(())
    }

    /// The chain for `domain`, in attempt order. Empty if nothing is registered.
    pub fn chain(&self, domain: Domain) -> &[RegisteredProvider] {
        self.chains.get(&domain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Provider names for `domain`, in attempt order.
    pub fn chain_names(&self, domain: Domain) -> Vec<&str> {
        self.chain(domain).iter().map(RegisteredProvider::name).collect()
    }

    /// Total number of registered providers across all domains.
    pub fn len(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
