//! HTTP/REST API layer for BharatAI.
//!
//! Axum routes under `/query/*` with JSON bodies, permissive CORS and
//! request tracing.

pub mod error;
pub mod handlers;
pub mod router;
