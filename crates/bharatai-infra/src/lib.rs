//! Infrastructure for the BharatAI router.
//!
//! Concrete [`ProviderAdapter`](bharatai_core::router::adapter::ProviderAdapter)
//! implementations over `reqwest`, the adapter factory, the TOML config loader
//! and the environment credential resolver.

pub mod adapters;
pub mod config;
pub mod credentials;
