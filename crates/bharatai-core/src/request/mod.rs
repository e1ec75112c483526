//! Inbound request handling: payload validation and prompt templates.

pub mod normalizer;
pub mod prompt;

pub use normalizer::{RawPayload, normalize};
