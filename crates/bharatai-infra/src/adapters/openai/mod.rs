//! OpenAI chat completions adapter.
//!
//! `POST {endpoint}/chat/completions` with a bearer key and a single user
//! message.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use bharatai_core::router::adapter::ProviderAdapter;
use bharatai_types::provider::{Capability, ProviderError, ProviderSpec, Reply};
use bharatai_types::query::Query;

use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::http;

pub struct OpenAiAdapter {
    client: reqwest::Client,
    name: String,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

impl OpenAiAdapter {
    pub fn new(client: reqwest::Client, spec: &ProviderSpec, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            name: spec.name.clone(),
            endpoint: spec.endpoint().to_string(),
            model: spec.model.clone(),
            api_key,
        }
    }

    fn to_request(&self, query: &Query) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: query.text().unwrap_or_default().to_string(),
            }],
        }
    }
}

impl ProviderAdapter for OpenAiAdapter {
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
            .post(format!("{}/chat/completions", self.endpoint))
            .timeout(timeout)
            .bearer_auth(api_key.expose_secret())
            .json(&self.to_request(query));

        let raw = http::send_json(request).await?;
        map_response(&self.name, raw)
    }
}

/// `choices[0].message.content`, else `choices[0].text`.
pub fn map_response(source: &str, raw: Value) -> Result<Reply, ProviderError> {
    let parsed: ChatCompletionResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ProviderError::malformed(format!("unexpected OpenAI response shape: {e}")))?;

    let choice = parsed
        .choices
        .first()
        .ok_or_else(|| ProviderError::malformed("response has no choices"))?;

    let text = choice
        .message
        .as_ref()
        .and_then(|m| m.content.as_deref())
        .filter(|t| !t.trim().is_empty())
        .or_else(|| choice.text.as_deref().filter(|t| !t.trim().is_empty()))
        .ok_or_else(|| ProviderError::malformed("first choice carries no content"))?;

    Ok(Reply::text(source, text).with_raw_payload(raw))
}
