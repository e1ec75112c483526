use thiserror::Error;

use crate::provider::{Capability, FailureRecord};
use crate::query::Domain;

/// Caller input rejected before any provider is contacted.
///
/// The `Display` text is the user-facing message returned in the
/// `{ "error": ... }` body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Prompt is required.")]
    EmptyPrompt,

    #[error("Valid image data is required.")]
    InvalidImage,

    #[error("Location is required.")]
    MissingLocation,

    #[error("Symptoms are required.")]
    MissingSymptoms,

    #[error("Disease name is required.")]
    MissingDisease,

    #[error("Payload does not match the {domain} domain.")]
    PayloadMismatch { domain: Domain },
}

/// Chain-level failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Every provider in the chain failed and the domain has no static dataset.
    #[error("all {} providers for {domain} failed", failures.len())]
    AllProvidersExhausted {
        domain: Domain,
        failures: Vec<FailureRecord>,
    },

    /// The caller went away before a provider answered.
    #[error("resolution for {domain} was cancelled")]
    Cancelled {
        domain: Domain,
        failures: Vec<FailureRecord>,
    },
}

impl RouterError {
    /// Failure records collected before the chain gave up.
    pub fn failures(&self) -> &[FailureRecord] {
        match self {
            RouterError::AllProvidersExhausted { failures, .. } => failures,
            RouterError::Cancelled { failures, .. } => failures,
        }
    }
}

/// Registry construction errors (startup only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("provider '{provider}' implements {capability} which cannot serve {domain}")]
    CapabilityMismatch {
        provider: String,
        capability: Capability,
        domain: Domain,
    },

    #[error("provider '{provider}' is registered twice in {domain}")]
    DuplicateProvider { provider: String, domain: Domain },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ErrorKind, ProviderError};

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyPrompt.to_string(), "Prompt is required.");
        assert_eq!(
            ValidationError::InvalidImage.to_string(),
            "Valid image data is required."
        );
        assert_eq!(
            ValidationError::MissingLocation.to_string(),
            "Location is required."
        );
    }

    #[test]
    fn test_exhausted_display_counts_failures() {
        let failures = vec![
            FailureRecord::new("Gemini", ProviderError::auth("missing key"), chrono::Utc::now()),
            FailureRecord::new("OpenAI", ProviderError::timeout("slow"), chrono::Utc::now()),
        ];
        let err = RouterError::AllProvidersExhausted {
            domain: Domain::TextChat,
            failures,
        };
        assert_eq!(err.to_string(), "all 2 providers for text_chat failed");
        assert_eq!(err.failures()[1].error_kind, ErrorKind::Timeout);
    }

    #[test]
    fn test_capability_mismatch_display() {
        let err = RegistryError::CapabilityMismatch {
            provider: "data.gov.in".to_string(),
            capability: Capability::DatasetQuery,
            domain: Domain::TextChat,
        };
        assert!(err.to_string().contains("dataset_query"));
        assert!(err.to_string().contains("text_chat"));
    }
}
