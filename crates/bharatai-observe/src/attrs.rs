//! Span attribute names for query resolution.
//!
//! Field names are string slices usable with `Span::record`; the span must
//! declare the same field (as `tracing::field::Empty`) when it is created.
//!
//! Span naming convention: `"{operation} {domain}"` (e.g., `"resolve text_chat"`),
//! set through the `otel.name` field.

use std::fmt::Display;

// --- Field names ---

/// Domain chain serving the request (e.g., "market_data").
pub const DOMAIN: &str = "bharatai.domain";

/// Envelope source: the answering provider's name, or "fallback".
pub const ENVELOPE_SOURCE: &str = "bharatai.source";

/// Whether the answer came from a static dataset.
pub const IS_FALLBACK: &str = "bharatai.is_fallback";

/// Number of providers that failed before the answer (or before giving up).
pub const FAILED_ATTEMPTS: &str = "bharatai.failed_attempts";

// --- Operation name values ---

/// Resolution of one query through its domain chain.
pub const OP_RESOLVE: &str = "resolve";

/// Build a span name following the `"{operation} {domain}"` convention.
pub fn span_name(operation: &str, domain: impl Display) -> String {
    format!("{operation} {domain}")
}
