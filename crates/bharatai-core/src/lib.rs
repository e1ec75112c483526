//! Business logic for the BharatAI provider router.
//!
//! - `router`: the adapter trait, registry, fallback orchestrator and
//!   envelope builder
//! - `request`: inbound payload normalization and prompt templates
//! - `dataset`: bundled static answers used when a live chain is exhausted

pub mod dataset;
pub mod request;
pub mod router;
