//! Fallback orchestrator.
//!
//! Walks a domain's chain strictly in order, one attempt per provider, until
//! the first success. Each attempt is bounded by the provider's timeout and
//! raced against the caller's cancellation token. When the chain is exhausted
//! the domain's static dataset is served if it has one; otherwise the caller
//! gets [`RouterError::AllProvidersExhausted`] with every failure record.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

use bharatai_types::envelope::Envelope;
use bharatai_types::error::RouterError;
use bharatai_types::provider::{FailureRecord, ProviderError, Reply};
use bharatai_types::query::{Domain, Query};

use super::envelope::{self, Outcome};
use super::policy::{self, ChainAction};
use super::registry::{ProviderRegistry, RegisteredProvider};
use crate::dataset::FallbackDatasets;

/// A successful resolution.
///
/// `failures` holds the attempts that failed before the answer was found
/// (e.g. a rate-limited primary), in chain order.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub envelope: Envelope,
    pub failures: Vec<FailureRecord>,
}

/// Routes queries through the registry's per-domain chains.
///
/// Stateless between requests; share it behind an `Arc`.
pub struct FallbackOrchestrator {
    registry: Arc<ProviderRegistry>,
    datasets: FallbackDatasets,
}

impl FallbackOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>, datasets: FallbackDatasets) -> Self {
        Self { registry, datasets }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve `query` through its domain's chain.
    pub async fn resolve(&self, query: &Query) -> Result<Resolution, RouterError> {
        self.resolve_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Resolve `query`, abandoning the chain as soon as `cancel` fires.
    ///
    /// A cancelled run records a `Cancelled` failure for the in-flight
    /// provider, contacts no further providers and does not serve the static
    /// dataset.
    #[tracing::instrument(name = "resolve", skip_all, fields(domain = %query.domain()))]
    pub async fn resolve_with_cancel(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Resolution, RouterError> {
        let domain = query.domain();
        let chain = self.registry.chain(domain);
        let mut failures: Vec<FailureRecord> = Vec::new();

        for (position, entry) in chain.iter().enumerate() {
            let attempted_at = Utc::now();
            tracing::debug!(provider = %entry.name(), position, "Invoking provider");

            match attempt(entry, query, cancel).await {
                Ok(mut reply) => {
                    reply.source_name = entry.name().to_string();
                    if position > 0 {
                        tracing::info!(
                            provider = %entry.name(),
                            skipped = failures.len(),
                            "Answered by non-primary provider"
                        );
                    }
                    let envelope = envelope::build(domain, Outcome::Live(&reply));
                    return Ok(Resolution { envelope, failures });
                }
                Err(err) => {
                    let kind = err.kind;
                    tracing::warn!(
                        provider = %entry.name(),
                        error_kind = %kind,
                        error = %err.message,
                        "Provider failed"
                    );
                    failures.push(FailureRecord::new(entry.name(), err, attempted_at));

                    if policy::next_action(kind) == ChainAction::Stop {
                        tracing::info!(attempts = failures.len(), "Resolution cancelled by caller");
                        return Err(RouterError::Cancelled { domain, failures });
                    }
                }
            }
        }

        self.exhausted(domain, failures)
    }

    fn exhausted(
        &self,
        domain: Domain,
        failures: Vec<FailureRecord>,
    ) -> Result<Resolution, RouterError> {
        if let Some(dataset) = self.datasets.get(domain) {
            tracing::warn!(
                attempts = failures.len(),
                rows = dataset.records().len(),
                "Live chain exhausted, serving static dataset"
            );
            let envelope = envelope::build(domain, Outcome::Fallback(dataset));
            return Ok(Resolution { envelope, failures });
        }

        tracing::error!(attempts = failures.len(), "All providers failed");
        for record in &failures {
            tracing::error!(
                provider = %record.provider_name,
                error_kind = %record.error_kind,
                error = %record.message,
                attempted_at = %record.attempted_at,
                "Provider failure"
            );
        }
        Err(RouterError::AllProvidersExhausted { domain, failures })
    }
}

/// One bounded, cancellable invocation.
async fn attempt(
    entry: &RegisteredProvider,
    query: &Query,
    cancel: &CancellationToken,
) -> Result<Reply, ProviderError> {
    let span = info_span!(
        "provider.invoke",
        gen_ai.system = entry.name(),
        gen_ai.request.model = %entry.spec.model,
    );
    let call = tokio::time::timeout(entry.timeout, entry.adapter.invoke(query, entry.timeout))
        .instrument(span);

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProviderError::cancelled()),
        result = call => match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::timeout(format!(
                "no response within {} ms",
                entry.timeout.as_millis()
            ))),
        },
    }
}
