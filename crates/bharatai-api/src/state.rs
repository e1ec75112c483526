//! Application state wiring config, credentials and the orchestrator.
//!
//! Built once at startup and shared by the CLI commands and the HTTP
//! handlers. Everything inside is read-only after construction.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use bharatai_core::dataset::FallbackDatasets;
use bharatai_core::router::orchestrator::FallbackOrchestrator;
use bharatai_core::router::registry::ProviderRegistry;
use bharatai_infra::adapters::build_registry;
use bharatai_infra::config::load_router_config;
use bharatai_infra::credentials::CredentialStore;
use bharatai_types::config::RouterConfig;
use bharatai_types::provider::{ProviderKind, ProviderSpec};
use bharatai_types::query::Domain;

/// Public description of one configured provider (no secrets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderView {
    pub name: String,
    pub kind: ProviderKind,
    pub domain: Domain,
    pub priority: u32,
    pub model: String,
    pub enabled: bool,
    pub has_credential: bool,
}

impl ProviderView {
    pub fn from_spec(spec: &ProviderSpec, credentials: &CredentialStore) -> Self {
        Self {
            name: spec.name.clone(),
            kind: spec.kind,
            domain: spec.domain,
            priority: spec.priority,
            model: spec.model.clone(),
            enabled: spec.enabled,
            has_credential: credentials.has_credential(spec),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
    pub config: Arc<RouterConfig>,
    /// Every configured provider in domain, then chain, order.
    pub providers: Arc<Vec<ProviderView>>,
}

impl AppState {
    /// Load config, resolve credentials from the environment and build the
    /// provider registry.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_router_config(config_path).await?;
        let credentials = CredentialStore::from_env(&config.providers);
        let registry = build_registry(&config, &credentials)?;

        let providers = Domain::ALL
            .iter()
            .flat_map(|domain| config.chain(*domain))
            .map(|spec| ProviderView::from_spec(spec, &credentials))
            .collect();

        Ok(Self::new(config, registry, providers))
    }

    pub fn new(config: RouterConfig, registry: ProviderRegistry, providers: Vec<ProviderView>) -> Self {
        let orchestrator = FallbackOrchestrator::new(Arc::new(registry), FallbackDatasets::standard());
        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
            providers: Arc::new(providers),
        }
    }
}
