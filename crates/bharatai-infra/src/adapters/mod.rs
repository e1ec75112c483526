//! Provider adapter implementations.
//!
//! Concrete implementations of the
//! [`ProviderAdapter`](bharatai_core::router::adapter::ProviderAdapter) trait,
//! one per [`ProviderKind`], plus the factory ([`create_adapter`]) and the
//! registry assembly used at startup ([`build_registry`]).

pub mod gemini;
pub mod http;
pub mod huggingface;
pub mod open_data;
pub mod openai;

use anyhow::Context as _;
use secrecy::SecretString;

use bharatai_core::router::box_adapter::BoxProviderAdapter;
use bharatai_core::router::registry::ProviderRegistry;
use bharatai_types::config::RouterConfig;
use bharatai_types::provider::{ProviderKind, ProviderSpec};

use crate::credentials::CredentialStore;

use self::gemini::GeminiAdapter;
use self::huggingface::HuggingFaceAdapter;
use self::open_data::OpenDataAdapter;
use self::openai::OpenAiAdapter;

/// Create a [`BoxProviderAdapter`] for `spec`.
///
/// A missing `api_key` is not an error here; the adapter fails with an auth
/// error when invoked.
pub fn create_adapter(
    client: &reqwest::Client,
    spec: &ProviderSpec,
    api_key: Option<SecretString>,
) -> BoxProviderAdapter {
    let client = client.clone();
    match spec.kind {
        ProviderKind::Gemini => BoxProviderAdapter::new(GeminiAdapter::text(client, spec, api_key)),
        ProviderKind::GeminiVision => {
            BoxProviderAdapter::new(GeminiAdapter::vision(client, spec, api_key))
        }
        ProviderKind::OpenAi => BoxProviderAdapter::new(OpenAiAdapter::new(client, spec, api_key)),
        ProviderKind::HuggingFace => {
            BoxProviderAdapter::new(HuggingFaceAdapter::new(client, spec, api_key))
        }
        ProviderKind::OpenData => {
            BoxProviderAdapter::new(OpenDataAdapter::new(client, spec, api_key))
        }
    }
}

/// Build every enabled provider in `config` into a registry.
///
/// All adapters share one HTTP client. Fails on a spec whose kind cannot
/// serve its domain, or on a duplicate name within a domain.
pub fn build_registry(
    config: &RouterConfig,
    credentials: &CredentialStore,
) -> anyhow::Result<ProviderRegistry> {
    let client = http::build_client().context("failed to build HTTP client")?;
    let mut registry = ProviderRegistry::new();

    for spec in config.providers.iter().filter(|p| p.enabled) {
        let adapter = create_adapter(&client, spec, credentials.for_spec(spec));
        let timeout = spec.timeout(config.default_timeout());
        registry
            .register(spec.clone(), timeout, adapter)
            .with_context(|| format!("invalid provider '{}'", spec.name))?;
    }

    tracing::info!(providers = registry.len(), "Provider registry built");
    Ok(registry)
}


#[cfg(test)]
mod tests {
    use super::*;
    use bharatai_types::provider::Capability;
    use bharatai_types::query::Domain;

    fn no_credentials(config: &RouterConfig) -> CredentialStore {
        CredentialStore::resolve_with(&config.providers, |_| None)
    }

    #[test]
    fn create_adapter_matches_kind_capability() {
        let client = reqwest::Client::new();
        for (kind, domain, capability) in [
            (ProviderKind::Gemini, Domain::TextChat, Capability::TextGenerate),
            (ProviderKind::GeminiVision, Domain::VisionAnalyze, Capability::VisionAnalyze),
            (ProviderKind::OpenAi, Domain::TextChat, Capability::TextGenerate),
            (ProviderKind::HuggingFace, Domain::TextChat, Capability::TextGenerate),
            (ProviderKind::OpenData, Domain::MarketData, Capability::DatasetQuery),
        ] {
            let spec = test_support::spec_for(kind, domain, "http://unused");
            let adapter = create_adapter(&client, &spec, None);
            assert_eq!(adapter.capability(), capability);
            assert_eq!(adapter.capability(), kind.capability());
            assert_eq!(adapter.name(), kind.to_string());
        }
    }

    #[tokio::test]
    async fn default_config_builds_without_credentials() {
        let config = RouterConfig::default();
        let registry = build_registry(&config, &no_credentials(&config)).unwrap();

        assert_eq!(registry.chain_names(Domain::TextChat), vec!["Gemini", "OpenAI"]);
        assert_eq!(registry.chain_names(Domain::VisionAnalyze), vec!["Gemini"]);
        assert_eq!(registry.chain_names(Domain::MarketData), vec!["data.gov.in"]);
    }

    #[tokio::test]
    async fn per_provider_timeout_overrides_default() {
        let mut config = RouterConfig::default();
        config.default_timeout_ms = 9_000;
        config.providers[0].timeout_ms = Some(1_500);
        let first = config.providers[0].clone();
        let registry = build_registry(&config, &no_credentials(&config)).unwrap();

        let entry = registry
            .chain(first.domain)
            .iter()
            .find(|p| p.name() == first.name)
            .unwrap();
        assert_eq!(entry.timeout, std::time::Duration::from_millis(1_500));
    }

    #[tokio::test]
    async fn mismatched_kind_is_a_startup_error() {
        let mut config = RouterConfig::default();
        let mut bad = test_support::spec_for(ProviderKind::OpenData, Domain::TextChat, "http://x");
        bad.name = "Datastore".to_string();
        config.providers.push(bad);

        let err = build_registry(&config, &no_credentials(&config)).unwrap_err();
        assert!(format!("{err:#}").contains("Datastore"));
    }
}
