//! Google Gemini adapters (text and vision).
//!
//! Both call `POST {endpoint}/models/{model}:generateContent`. The vision
//! adapter adds the query image as an `inlineData` part ahead of the prompt.
//! The API key travels in the `x-goog-api-key` header, never in the URL.

pub mod types;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use bharatai_core::router::adapter::ProviderAdapter;
use bharatai_types::provider::{Capability, ProviderError, ProviderSpec, Reply};
use bharatai_types::query::Query;

use self::types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use super::http;

/// Gemini `generateContent` adapter.
///
/// Does not derive `Debug`; it holds the API key.
pub struct GeminiAdapter {
    client: reqwest::Client,
    name: String,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
    capability: Capability,
}

impl GeminiAdapter {
    /// Text-only adapter for the chat chain.
    pub fn text(client: reqwest::Client, spec: &ProviderSpec, api_key: Option<SecretString>) -> Self {
        Self::with_capability(client, spec, api_key, Capability::TextGenerate)
    }

    /// Image + prompt adapter for the crop diagnosis chain.
    pub fn vision(
        client: reqwest::Client,
        spec: &ProviderSpec,
        api_key: Option<SecretString>,
    ) -> Self {
        Self::with_capability(client, spec, api_key, Capability::VisionAnalyze)
    }

    fn with_capability(
        client: reqwest::Client,
        spec: &ProviderSpec,
        api_key: Option<SecretString>,
        capability: Capability,
    ) -> Self {
        Self {
            client,
            name: spec.name.clone(),
            endpoint: spec.endpoint().to_string(),
            model: spec.model.clone(),
            api_key,
            capability,
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn to_request(&self, query: &Query) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);
        if self.capability == Capability::VisionAnalyze {
            if let Some(image) = query.image() {
                parts.push(Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: STANDARD.encode(&image.bytes),
                    },
                });
            }
        }
        parts.push(Part::Text {
            text: query.text().unwrap_or_default().to_string(),
        });
        GenerateContentRequest {
            contents: vec![Content { parts }],
        }
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    async fn invoke(&self, query: &Query, timeout: Duration) -> Result<Reply, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::auth(format!("{} API key is not configured", self.name)))?;

        let request = self
            .client
            .post(self.url())
            .timeout(timeout)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&self.to_request(query));

        let raw = http::send_json(request).await?;
        map_response(&self.name, raw)
    }
}

/// Extract the reply text from a decoded `generateContent` response.
///
/// Joins `candidates[0].content.parts[*].text`; falls back to the
/// candidate's `output` field. A response with no candidates but a
/// `promptFeedback.blockReason` names the block reason.
pub fn map_response(source: &str, raw: Value) -> Result<Reply, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ProviderError::malformed(format!("unexpected Gemini response shape: {e}")))?;

    let Some(candidate) = parsed.candidates.first() else {
        return Err(match parsed.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => ProviderError::malformed(format!("prompt blocked: {reason}")),
            None => ProviderError::malformed("response has no candidates"),
        });
    };

    let joined: String = candidate
        .content
        .iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect();
    if !joined.trim().is_empty() {
        return Ok(Reply::text(source, joined).with_raw_payload(raw));
    }

    match candidate.output.as_deref().filter(|o| !o.trim().is_empty()) {
        Some(output) => Ok(Reply::text(source, output).with_raw_payload(raw)),
        None => Err(ProviderError::malformed("first candidate carries no text")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::{spawn_upstream, spec_for};
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::post;
    use bharatai_types::provider::{ErrorKind, ProviderKind};
    use bharatai_types::query::{Domain, ImagePayload};
    use serde_json::json;

    #[test]
    fn maps_joined_parts() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [ { "text": "Use urea " }, { "text": "and DAP." } ] }
            }]
        });
        let reply = map_response("Gemini", raw).unwrap();
        assert_eq!(reply.text, "Use urea and DAP.");
        assert_eq!(reply.source_name, "Gemini");
        assert!(reply.raw_payload.get("candidates").is_some());
    }

    #[test]
    fn falls_back_to_output_field() {
        let raw = json!({ "candidates": [ { "output": "Leaf blight." } ] });
        assert_eq!(map_response("Gemini", raw).unwrap().text, "Leaf blight.");
    }

    #[test]
    fn block_reason_is_malformed() {
        let raw = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = map_response("Gemini", raw).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
        assert!(err.message.contains("SAFETY"));
    }

    #[test]
    fn empty_candidate_is_malformed() {
        let raw = json!({ "candidates": [ { "content": { "parts": [ { "text": "  " } ] } } ] });
        assert_eq!(
            map_response("Gemini", raw).unwrap_err().kind,
            ErrorKind::MalformedResponse
        );
        let raw = json!({ "candidates": [] });
        assert_eq!(
            map_response("Gemini", raw).unwrap_err().kind,
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn vision_request_puts_image_first() {
        let spec = spec_for(ProviderKind::GeminiVision, Domain::VisionAnalyze, "http://unused");
        let adapter = GeminiAdapter::vision(reqwest::Client::new(), &spec, None);
        let query = Query::new(Domain::VisionAnalyze)
            .with_text("Identify disease")
            .with_image(ImagePayload {
                bytes: b"hello".to_vec(),
                mime_type: "image/png".to_string(),
            });

        let body = serde_json::to_value(adapter.to_request(&query)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } },
                        { "text": "Identify disease" }
                    ]
                }]
            })
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_upstream() {
        let spec = spec_for(ProviderKind::Gemini, Domain::TextChat, "http://127.0.0.1:1");
        let adapter = GeminiAdapter::text(reqwest::Client::new(), &spec, None);
        let query = Query::new(Domain::TextChat).with_text("hi");
        let err = adapter.invoke(&query, Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Auth);
    }

    #[tokio::test]
    async fn sends_key_header_and_model_path() {
        let app = axum::Router::new().route(
            "/models/{*rest}",
            post(|uri: Uri, headers: HeaderMap| async move {
                let key = headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("none")
                    .to_string();
                Json(json!({
                    "candidates": [{ "content": { "parts": [ { "text": format!("{} {key}", uri.path()) } ] } }]
                }))
            }),
        );
        let base = spawn_upstream(app).await;
        let spec = spec_for(ProviderKind::Gemini, Domain::TextChat, &base);
        let adapter = GeminiAdapter::text(
            reqwest::Client::new(),
            &spec,
            Some(SecretString::from("g-test-key")),
        );

        let query = Query::new(Domain::TextChat).with_text("hi");
        let reply = adapter.invoke(&query, Duration::from_secs(5)).await.unwrap();
        assert_eq!(reply.text, "/models/test-model:generateContent g-test-key");
    }

    #[tokio::test]
    async fn rate_limit_status_is_classified() {
        let app = axum::Router::new().route(
            "/models/{*rest}",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base = spawn_upstream(app).await;
        let spec = spec_for(ProviderKind::Gemini, Domain::TextChat, &base);
        let adapter = GeminiAdapter::text(
            reqwest::Client::new(),
            &spec,
            Some(SecretString::from("g-test-key")),
        );

        let query = Query::new(Domain::TextChat).with_text("hi");
        let err = adapter.invoke(&query, Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert!(!err.message.contains("g-test-key"));
    }
}
