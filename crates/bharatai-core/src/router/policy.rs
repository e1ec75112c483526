//! Chain-continuation policy.

use bharatai_types::provider::ErrorKind;

/// What the orchestrator does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    /// Try the next provider in the chain.
    Advance,
    /// Stop walking the chain.
    Stop,
}

/// Decide whether a failure of `kind` lets the chain continue.
///
/// Every adapter failure advances, including `Auth`: a rejected key on one
/// provider says nothing about the next. Only caller cancellation stops.
pub fn next_action(kind: ErrorKind) -> ChainAction {
    match kind {
        ErrorKind::Auth
        | ErrorKind::RateLimited
        | ErrorKind::Timeout
        | ErrorKind::UpstreamServer
        | ErrorKind::MalformedResponse => ChainAction::Advance,
        ErrorKind::Cancelled => ChainAction::Stop,
    }
}
