//! Application error type mapping to HTTP status codes and `{ "error": ... }`
//! bodies.
//!
//! Provider failure details are logged by the orchestrator and never
//! returned to the caller.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bharatai_types::error::{RouterError, ValidationError};

/// Generic message for an exhausted chain.
pub const EXHAUSTED_MESSAGE: &str = "All providers failed.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Caller input rejected by the normalizer.
    Validation(ValidationError),
    /// Chain-level failure.
    Router(RouterError),
    /// Request body could not be decoded.
    BadRequest(String),
    /// Request body exceeded the router's size limit.
    PayloadTooLarge(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<RouterError> for AppError {
    fn from(e: RouterError) -> Self {
        AppError::Router(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::Router(RouterError::AllProvidersExhausted { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, EXHAUSTED_MESSAGE.to_string())
            }
            AppError::Router(RouterError::Cancelled { domain, .. }) => {
                tracing::info!(%domain, "Request cancelled before a provider answered");
                // 499: client closed request
                let status = StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT);
                (status, "Request cancelled.".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bharatai_types::query::Domain;

    #[test]
    fn validation_is_bad_request_with_message() {
        let response = AppError::from(ValidationError::InvalidImage).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn exhaustion_is_internal_error() {
        let err = RouterError::AllProvidersExhausted {
            domain: Domain::TextChat,
            failures: Vec::new(),
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn cancellation_is_client_closed() {
        let err = RouterError::Cancelled {
            domain: Domain::MarketData,
            failures: Vec::new(),
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status().as_u16(), 499);
    }
}
