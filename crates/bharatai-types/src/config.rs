//! Router configuration types.
//!
//! `RouterConfig` represents the top-level `bharatai.toml`: the HTTP bind
//! address, the default per-provider timeout, and every provider chain.
//! All fields have sensible defaults, so an empty file yields the standard
//! Gemini/OpenAI text chain, the Gemini vision chain and the data.gov.in
//! market chain.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::provider::{ProviderKind, ProviderSpec};
use crate::query::Domain;

/// Top-level configuration, constructed once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Timeout applied to providers that do not set `timeout_ms`.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Every provider across all domain chains.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderSpec>,
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            server: ServerConfig::default(),
            providers: default_providers(),
        }
    }
}

impl RouterConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Providers configured for `domain`, in priority order.
    pub fn chain(&self, domain: Domain) -> Vec<&ProviderSpec> {
        let mut specs: Vec<&ProviderSpec> = self
            .providers
            .iter()
            .filter(|p| p.domain == domain)
            .collect();
        specs.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        specs
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// data.gov.in resource id for daily mandi commodity prices.
pub const MANDI_RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";

fn spec(
    name: &str,
    kind: ProviderKind,
    domain: Domain,
    priority: u32,
    model: &str,
    credential_env: &str,
) -> ProviderSpec {
    ProviderSpec {
        name: name.to_string(),
        kind,
        domain,
        priority,
        endpoint: None,
        model: model.to_string(),
        credential_env: Some(credential_env.to_string()),
        timeout_ms: None,
        enabled: true,
        params: BTreeMap::new(),
    }
}

/// The built-in provider chains.
pub fn default_providers() -> Vec<ProviderSpec> {
    let mut huggingface = spec(
        "HuggingFace",
        ProviderKind::HuggingFace,
        Domain::TextChat,
        2,
        "mistralai/Mixtral-8x7B-Instruct-v0.1",
        "HF_API_KEY",
    );
    huggingface.enabled = false;

    let mut open_data = spec(
        "data.gov.in",
        ProviderKind::OpenData,
        Domain::MarketData,
        0,
        "",
        "DATA_GOV_API_KEY",
    );
    open_data
        .params
        .insert("resource_id".to_string(), MANDI_RESOURCE_ID.to_string());
    open_data.params.insert("limit".to_string(), "10".to_string());

    vec![
        spec(
            "Gemini",
            ProviderKind::Gemini,
            Domain::TextChat,
            0,
            "gemini-2.5-flash",
            "GEMINI_API_KEY",
        ),
        spec(
            "OpenAI",
            ProviderKind::OpenAi,
            Domain::TextChat,
            1,
            "gpt-4o-mini",
            "OPENAI_API_KEY",
        ),
        huggingface,
        spec(
            "Gemini",
            ProviderKind::GeminiVision,
            Domain::VisionAnalyze,
            0,
            "gemini-2.5-flash",
            "GEMINI_API_KEY",
        ),
        open_data,
    ]
}
