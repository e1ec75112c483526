//! Provider-facing types: specs, replies, the failure taxonomy.
//!
//! These types model one adapter invocation: the static [`ProviderSpec`]
//! describing the backend, the canonical [`Reply`] on success, and the
//! [`ProviderError`] / [`FailureRecord`] pair on failure.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Domain;

/// The one thing an adapter knows how to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    TextGenerate,
    VisionAnalyze,
    DatasetQuery,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::TextGenerate => write!(f, "text_generate"),
            Capability::VisionAnalyze => write!(f, "vision_analyze"),
            Capability::DatasetQuery => write!(f, "dataset_query"),
        }
    }
}

/// Backend type for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`, text only.
    Gemini,
    /// Google Gemini `generateContent` with an inline image part.
    GeminiVision,
    /// OpenAI chat completions.
    #[serde(rename = "openai")]
    OpenAi,
    /// Hugging Face inference router.
    #[serde(rename = "huggingface")]
    HuggingFace,
    /// data.gov.in open datastore.
    OpenData,
}

impl ProviderKind {
    /// Capability implemented by adapters of this kind.
    pub fn capability(&self) -> Capability {
        match self {
            ProviderKind::Gemini | ProviderKind::OpenAi | ProviderKind::HuggingFace => {
                Capability::TextGenerate
            }
            ProviderKind::GeminiVision => Capability::VisionAnalyze,
            ProviderKind::OpenData => Capability::DatasetQuery,
        }
    }

    /// Base URL used when a spec does not override `endpoint`.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Gemini | ProviderKind::GeminiVision => {
                "https://generativelanguage.googleapis.com/v1beta"
            }
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::HuggingFace => "https://router.huggingface.co/hf-inference/models",
            ProviderKind::OpenData => "https://data.gov.in/api/datastore/resource.json",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::GeminiVision => write!(f, "gemini_vision"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::HuggingFace => write!(f, "huggingface"),
            ProviderKind::OpenData => write!(f, "open_data"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "gemini_vision" => Ok(ProviderKind::GeminiVision),
            "openai" => Ok(ProviderKind::OpenAi),
            "huggingface" => Ok(ProviderKind::HuggingFace),
            "open_data" => Ok(ProviderKind::OpenData),
            other => Err(format!("invalid provider kind: '{other}'")),
        }
    }
}

/// Static description of one provider in a domain chain.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Name reported as the envelope `source` (e.g. "Gemini", "OpenAI").
    pub name: String,
    /// Backend type.
    pub kind: ProviderKind,
    /// Domain chain this provider belongs to.
    pub domain: Domain,
    /// Fallback ordering; lower = tried first.
    pub priority: u32,
    /// Base URL override; `None` uses [`ProviderKind::default_endpoint`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model identifier (ignored by dataset providers).
    #[serde(default)]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_env: Option<String>,
    /// Per-invocation budget; `None` uses the router-wide default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Disabled providers are skipped at registry build time.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Provider-specific extras (e.g. `resource_id`, `limit`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

fn default_enabled() -> bool {
    true
}

impl ProviderSpec {
    /// Effective base URL, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.kind.default_endpoint())
            .trim_end_matches('/')
    }

    /// Effective timeout, falling back to `default` when unset.
    pub fn timeout(&self, default: Duration) -> Duration {
        self.timeout_ms.map(Duration::from_millis).unwrap_or(default)
    }

    /// Look up a provider-specific parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// One row of mandi (market) price data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub crop: String,
    pub price: String,
    pub market: String,
    pub district: String,
}

impl MarketRecord {
    pub fn new(crop: &str, price: &str, market: &str, district: &str) -> Self {
        Self {
            crop: crop.to_string(),
            price: price.to_string(),
            market: market.to_string(),
            district: district.to_string(),
        }
    }
}

/// Canonical result of one successful adapter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Provider name that produced this reply.
    pub source_name: String,
    /// Generated text (may be empty; the envelope builder substitutes a default).
    pub text: String,
    /// Dataset rows; empty for generative providers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<MarketRecord>,
    /// The decoded upstream body, kept for diagnostics.
    #[serde(default)]
    pub raw_payload: serde_json::Value,
}

impl Reply {
    /// A text reply with no dataset rows.
    pub fn text(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            text: text.into(),
            records: Vec::new(),
            raw_payload: serde_json::Value::Null,
        }
    }

    pub fn with_raw_payload(mut self, raw: serde_json::Value) -> Self {
        self.raw_payload = raw;
        self
    }
}

/// Failure taxonomy tag.
///
/// The first five kinds are produced by adapters; `Cancelled` is produced
/// by the orchestrator when the caller goes away mid-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    RateLimited,
    Timeout,
    UpstreamServer,
    MalformedResponse,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Auth => write!(f, "auth_error"),
            ErrorKind::RateLimited => write!(f, "rate_limited"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::UpstreamServer => write!(f, "upstream_server_error"),
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Error returned by a single adapter invocation.
///
/// `message` is diagnostic text for logs. It must never contain credential
/// values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamServer, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "caller cancelled the request")
    }
}

/// One failed attempt within a single orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub provider_name: String,
    pub error_kind: ErrorKind,
    pub message: String,
    pub attempted_at: DateTime<Utc>,
}

impl FailureRecord {
    pub fn new(provider_name: &str, error: ProviderError, attempted_at: DateTime<Utc>) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            error_kind: error.kind,
            message: error.message,
            attempted_at,
        }
    }
}
