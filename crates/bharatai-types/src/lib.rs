//! Shared domain types for BharatAI.
//!
//! This crate contains the data shapes exchanged between the router core,
//! the provider adapters and the HTTP surface: queries, provider specs,
//! replies, failure records, envelopes, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod envelope;
pub mod error;
pub mod provider;
pub mod query;
