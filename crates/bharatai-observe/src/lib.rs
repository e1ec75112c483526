//! Observability for BharatAI: subscriber installation and span attribute
//! names shared by the router and the HTTP layer.

pub mod attrs;
pub mod tracing_setup;
