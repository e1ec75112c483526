//! Route handlers.

pub mod providers;
pub mod query;
