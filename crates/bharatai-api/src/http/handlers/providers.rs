//! Service metadata endpoints.

use axum::Json;
use axum::extract::State;

use crate::state::{AppState, ProviderView};

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /providers - configured chains, including disabled providers.
pub async fn list(State(state): State<AppState>) -> Json<Vec<ProviderView>> {
    Json(state.providers.as_ref().clone())
}
