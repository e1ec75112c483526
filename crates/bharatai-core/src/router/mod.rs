//! Multi-provider routing.
//!
//! - `ProviderAdapter`: RPITIT trait implemented by each concrete backend
//! - `BoxProviderAdapter`: object-safe wrapper for dynamic dispatch
//! - `ProviderRegistry`: immutable, domain-scoped, priority-ordered chains
//! - `policy`: the pure chain-continuation decision
//! - `FallbackOrchestrator`: walks a chain until the first success
//! - `envelope`: wraps the winning reply with provenance

pub mod adapter;
pub mod box_adapter;
pub mod envelope;
pub mod orchestrator;
pub mod policy;
pub mod registry;
