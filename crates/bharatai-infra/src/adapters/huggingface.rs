//! Hugging Face inference router adapter.
//!
//! `POST {endpoint}/{model}` with body `{ "inputs": prompt }`. The response
//! is either a list of generations or a single object depending on the
//! hosted model's task.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use bharatai_core::router::adapter::ProviderAdapter;
use bharatai_types::provider::{Capability, ProviderError, ProviderSpec, Reply};
use bharatai_types::query::Query;

use super::http;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    List(Vec<Generation>),
    Single(Generation),
}

#[derive(Debug, Default, Deserialize)]
struct Generation {
    generated_text: Option<String>,
    #[serde(default)]
    outputs: Vec<GenerationOutput>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationOutput {
    content: Option<String>,
}

pub struct HuggingFaceAdapter {
    client: reqwest::Client,
    name: String,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

impl HuggingFaceAdapter {
    pub fn new(client: reqwest::Client, spec: &ProviderSpec, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            name: spec.name.clone(),
            endpoint: spec.endpoint().to_string(),
            model: spec.model.clone(),
            api_key,
        }
    }
}

impl ProviderAdapter for HuggingFaceAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::TextGenerate
    }

    async fn invoke(&self, query: &Query, timeout: Duration) -> Result<Reply, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::auth(format!("{} API key is not configured", self.name)))?;

        let request = self
            .client
            .post(format!("{}/{}", self.endpoint, self.model))
            .timeout(timeout)
            .bearer_auth(api_key.expose_secret())
            .json(&InferenceRequest {
                inputs: query.text().unwrap_or_default(),
            });

        let raw = http::send_json(request).await?;
        map_response(&self.name, raw)
    }
}

/// `[0].generated_text`, else `generated_text`, else `outputs[0].content`.
pub fn map_response(source: &str, raw: Value) -> Result<Reply, ProviderError> {
    let parsed: InferenceResponse = serde_json::from_value(raw.clone()).map_err(|e| {
        ProviderError::malformed(format!("unexpected inference response shape: {e}"))
    })?;

    let text = match &parsed {
        InferenceResponse::List(items) => items.first().and_then(|g| g.generated_text.as_deref()),
        InferenceResponse::Single(g) => g
            .generated_text
            .as_deref()
            .or_else(|| g.outputs.first().and_then(|o| o.content.as_deref())),
    }
    .filter(|t| !t.trim().is_empty())
    .ok_or_else(|| ProviderError::malformed("response carries no generated text"))?;

    Ok(Reply::text(source, text).with_raw_payload(raw))
}
