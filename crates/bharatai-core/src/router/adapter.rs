//! ProviderAdapter trait definition.
//!
//! This is the core abstraction that every external backend implements.
//! Uses RPITIT for `invoke`; see `BoxProviderAdapter` for the object-safe
//! wrapper stored in the registry.

use std::time::Duration;

use bharatai_types::provider::{Capability, ProviderError, Reply};
use bharatai_types::query::Query;

/// Trait for provider backends (Gemini, OpenAI, data.gov.in, ...).
///
/// An adapter translates a canonical [`Query`] into its provider's wire
/// request, performs exactly one outbound call, and maps the wire response
/// back into a [`Reply`]. Failures are classified into the fixed
/// [`ErrorKind`](bharatai_types::provider::ErrorKind) taxonomy. Adapters never
/// retry.
///
/// Implementations live in bharatai-infra.
pub trait ProviderAdapter: Send + Sync {
    /// Provider name reported as the envelope source (e.g. "Gemini").
    fn name(&self) -> &str;

    /// The single capability this adapter implements.
    fn capability(&self) -> Capability;

    /// Send `query` to the provider.
    ///
    /// `timeout` is the provider's configured budget. The orchestrator
    /// enforces it as well; adapters pass it to their HTTP client so the
    /// socket is released promptly.
    fn invoke(
        &self,
        query: &Query,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<Reply, ProviderError>> + Send;
}
