//! Axum router configuration with middleware.
//!
//! Query routes live under `/query/`. Middleware: CORS, request tracing and
//! a 15 MB body cap (vision uploads are inline base64). Oversized bodies are
//! rejected by the JSON extractor, so they get the usual `{ "error": ... }`
//! body.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 15 * 1024 * 1024;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let query_routes = Router::new()
        .route("/text", post(handlers::query::text))
        .route("/vision", post(handlers::query::vision))
        .route("/market", get(handlers::query::market))
        .route("/recommendations", post(handlers::query::recommendations))
        .route("/health/symptom", post(handlers::query::symptom))
        .route("/health/tips", post(handlers::query::tips));

    Router::new()
        .nest("/query", query_routes)
        .route("/health", get(handlers::providers::health))
        .route("/providers", get(handlers::providers::list))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use bharatai_core::router::adapter::ProviderAdapter;
    use bharatai_core::router::box_adapter::BoxProviderAdapter;
    use bharatai_core::router::registry::ProviderRegistry;
    use bharatai_types::config::RouterConfig;
    use bharatai_types::provider::{
        Capability, ErrorKind, ProviderError, ProviderKind, ProviderSpec, Reply,
    };
    use bharatai_types::query::{Domain, Query};
    use serde_json::{Value, json};

    use crate::state::ProviderView;

    #[derive(Clone)]
    enum Behavior {
        Reply(String),
        /// Answer with the normalized query text.
        Echo,
        Fail(ErrorKind),
    }

    struct MockAdapter {
        name: String,
        capability: Capability,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl ProviderAdapter for MockAdapter {
        fn name(&self) -> &str {
            &self.name
        }

        fn capability(&self) -> Capability {
            self.capability
        }

        fn invoke(
            &self,
            query: &Query,
            _timeout: Duration,
        ) -> impl Future<Output = Result<Reply, ProviderError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let name = self.name.clone();
            let behavior = self.behavior.clone();
            let text = query.text().unwrap_or_default().to_string();
            async move {
                match behavior {
                    Behavior::Reply(reply) => Ok(Reply::text(name, reply)),
                    Behavior::Echo => Ok(Reply::text(name, text)),
                    Behavior::Fail(kind) => Err(ProviderError::new(kind, format!("{name} failed"))),
                }
            }
        }
    }

    fn spec(name: &str, kind: ProviderKind, domain: Domain, priority: u32) -> ProviderSpec {
        ProviderSpec {
            name: name.to_string(),
            kind,
            domain,
            priority,
            endpoint: None,
            model: "test-model".to_string(),
            credential_env: None,
            timeout_ms: None,
            enabled: true,
            params: BTreeMap::new(),
        }
    }

    struct TestApp {
        registry: ProviderRegistry,
        views: Vec<ProviderView>,
        calls: Arc<AtomicUsize>,
    }

    impl TestApp {
        fn new() -> Self {
            Self {
                registry: ProviderRegistry::new(),
                views: Vec::new(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn with(mut self, spec: ProviderSpec, behavior: Behavior) -> Self {
            let adapter = MockAdapter {
                name: spec.name.clone(),
                capability: spec.kind.capability(),
                behavior,
                calls: Arc::clone(&self.calls),
            };
            self.views.push(ProviderView {
                name: spec.name.clone(),
                kind: spec.kind,
                domain: spec.domain,
                priority: spec.priority,
                model: spec.model.clone(),
                enabled: spec.enabled,
                has_credential: true,
            });
            self.registry
                .register(spec, Duration::from_secs(5), BoxProviderAdapter::new(adapter))
                .unwrap();
            self
        }

        /// Serve the router on an ephemeral port; returns the base URL and
        /// the shared adapter call counter.
        async fn spawn(self) -> (String, Arc<AtomicUsize>) {
            let state = AppState::new(RouterConfig::default(), self.registry, self.views);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, build_router(state)).await.unwrap();
            });
            (format!("http://{addr}"), self.calls)
        }
    }

    fn text_chain() -> TestApp {
        TestApp::new()
            .with(
                spec("Gemini", ProviderKind::Gemini, Domain::TextChat, 0),
                Behavior::Fail(ErrorKind::RateLimited),
            )
            .with(
                spec("OpenAI", ProviderKind::OpenAi, Domain::TextChat, 1),
                Behavior::Reply("Use urea and DAP...".to_string()),
            )
    }

    async fn post_json(url: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new().post(url).json(&body).send().await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn get_json(url: &str) -> (u16, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn text_query_falls_through_to_secondary() {
        let (base, calls) = text_chain().spawn().await;

        let (status, body) = post_json(
            &format!("{base}/query/text"),
            json!({ "prompt": "Best fertilizer for wheat?" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({ "source": "OpenAI", "reply": "Use urea and DAP...", "isFallback": false })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_without_provider_calls() {
        let (base, calls) = text_chain().spawn().await;

        let (status, body) = post_json(&format!("{base}/query/text"), json!({ "prompt": "   " })).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Prompt is required." }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn exhausted_text_chain_hides_provider_details() {
        let (base, calls) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::Gemini, Domain::TextChat, 0),
                Behavior::Fail(ErrorKind::UpstreamServer),
            )
            .with(
                spec("OpenAI", ProviderKind::OpenAi, Domain::TextChat, 1),
                Behavior::Fail(ErrorKind::Auth),
            )
            .spawn()
            .await;

        let (status, body) = post_json(&format!("{base}/query/text"), json!({ "prompt": "hello" })).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "All providers failed." }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn undecodable_image_is_rejected() {
        let (base, calls) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::GeminiVision, Domain::VisionAnalyze, 0),
                Behavior::Reply("Leaf blight".to_string()),
            )
            .spawn()
            .await;

        let (status, body) = post_json(
            &format!("{base}/query/vision"),
            json!({ "cropType": "Rice", "image": "%%%not-base64%%%", "mimeType": "image/jpeg" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Valid image data is required." }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn vision_query_returns_diagnosis() {
        let (base, _) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::GeminiVision, Domain::VisionAnalyze, 0),
                Behavior::Echo,
            )
            .spawn()
            .await;

        let (status, body) = post_json(
            &format!("{base}/query/vision"),
            json!({ "cropType": "Rice", "image": "data:image/png;base64,aGVsbG8=" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["source"], "Gemini");
        assert!(body["reply"].as_str().unwrap().contains("Crop Type: Rice"));
    }

    #[tokio::test]
    async fn market_failure_serves_static_table() {
        let (base, calls) = TestApp::new()
            .with(
                spec("data.gov.in", ProviderKind::OpenData, Domain::MarketData, 0),
                Behavior::Fail(ErrorKind::Timeout),
            )
            .spawn()
            .await;

        let (status, body) = get_json(&format!("{base}/query/market?location=Punjab")).await;

        assert_eq!(status, 200);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["isFallback"], true);
        assert_eq!(body["data"][0]["crop"], "Rice");
        assert!(body.get("reply").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn market_accepts_state_alias() {
        let (base, calls) = TestApp::new().spawn().await;

        let (status, body) = get_json(&format!("{base}/query/market?state=Kerala")).await;

        assert_eq!(status, 200);
        assert_eq!(body["isFallback"], true);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_location_defers_to_state_alias() {
        let (base, _) = TestApp::new().spawn().await;

        let (status, body) = get_json(&format!("{base}/query/market?location=&state=Kerala")).await;

        assert_eq!(status, 200);
        assert_eq!(body["source"], "fallback");
    }

    #[tokio::test]
    async fn market_requires_location() {
        let (base, _) = TestApp::new().spawn().await;

        let (status, body) = get_json(&format!("{base}/query/market")).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Location is required." }));
    }

    #[tokio::test]
    async fn recommendation_builds_expert_prompt() {
        let (base, _) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::Gemini, Domain::TextChat, 0),
                Behavior::Echo,
            )
            .spawn()
            .await;

        let (status, body) = post_json(
            &format!("{base}/query/recommendations"),
            json!({ "cropType": "Wheat", "season": "Rabi" }),
        )
        .await;

        assert_eq!(status, 200);
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.contains("Crop: Wheat"));
        assert!(reply.contains("Soil: Not specified"));
        assert!(reply.contains("Season: Rabi"));
        assert!(reply.contains("Question: General advice"));
    }

    #[tokio::test]
    async fn health_routes_use_text_chain() {
        let (base, calls) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::Gemini, Domain::TextChat, 0),
                Behavior::Echo,
            )
            .spawn()
            .await;

        let (status, body) = post_json(
            &format!("{base}/query/health/symptom"),
            json!({ "symptoms": "fever and joint pain" }),
        )
        .await;
        assert_eq!(status, 200);
        assert!(body["reply"].as_str().unwrap().contains("fever and joint pain"));

        let (status, body) =
            post_json(&format!("{base}/query/health/tips"), json!({ "disease": "dengue" })).await;
        assert_eq!(status, 200);
        assert!(body["reply"].as_str().unwrap().contains("dengue in India"));

        let (status, body) = post_json(&format!("{base}/query/health/tips"), json!({})).await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Disease name is required." }));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (base, calls) = text_chain().spawn().await;

        let response = reqwest::Client::new()
            .post(format!("{base}/query/text"))
            .header("content-type", "application/json")
            .body("{\"prompt\": ")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_body_gets_json_error() {
        let (base, calls) = TestApp::new()
            .with(
                spec("Gemini", ProviderKind::GeminiVision, Domain::VisionAnalyze, 0),
                Behavior::Echo,
            )
            .spawn()
            .await;

        let envelope = r#"{"mimeType":"image/png","image":""}"#;
        let padding = "A".repeat(MAX_BODY_BYTES + 1 - envelope.len());
        let body = format!(r#"{{"mimeType":"image/png","image":"{padding}"}}"#);
        assert_eq!(body.len(), MAX_BODY_BYTES + 1);

        let response = reqwest::Client::new()
            .post(format!("{base}/query/vision"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 413);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn health_and_provider_listing() {
        let (base, _) = text_chain().spawn().await;

        let (status, body) = get_json(&format!("{base}/health")).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");

        let (status, body) = get_json(&format!("{base}/providers")).await;
        assert_eq!(status, 200);
        let providers = body.as_array().unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0]["name"], "Gemini");
        assert_eq!(providers[1]["kind"], "openai");
        assert_eq!(providers[1]["domain"], "text_chat");
        assert_eq!(providers[1]["hasCredential"], true);
    }
}
