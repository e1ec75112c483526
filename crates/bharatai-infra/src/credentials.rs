//! Environment credential resolution.
//!
//! Every provider spec names the environment variable holding its API key.
//! Keys are read once at startup into [`SecretString`]s. A missing or blank
//! variable is recorded as absent rather than failing startup; the adapter
//! reports an auth failure when it is first used.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use bharatai_types::provider::ProviderSpec;

/// API keys keyed by environment variable name.
///
/// Does not implement `Debug`; values are only reachable through
/// [`ExposeSecret`].
#[derive(Default)]
pub struct CredentialStore {
    by_env: HashMap<String, SecretString>,
}

impl CredentialStore {
    /// Resolve every credential referenced by `providers` from the process
    /// environment.
    pub fn from_env(providers: &[ProviderSpec]) -> Self {
        Self::resolve_with(providers, |name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup` (the environment in production).
    ///
    /// Disabled specs are resolved too, so listings report their key status;
    /// only enabled specs warn about a missing key.
    pub fn resolve_with<F>(providers: &[ProviderSpec], lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut by_env = HashMap::new();
        for spec in providers {
            let Some(env_name) = spec.credential_env.as_deref() else {
                continue;
            };
            if by_env.contains_key(env_name) {
                continue;
            }
            match lookup(env_name).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    by_env.insert(env_name.to_string(), SecretString::from(value));
                }
                None if spec.enabled => {
                    tracing::warn!(
                        provider = %spec.name,
                        env = env_name,
                        "Credential not set; provider will fail with an auth error"
                    );
                }
                None => {}
            }
        }
        Self { by_env }
    }

    /// The key for `spec`, if its variable was set.
    pub fn for_spec(&self, spec: &ProviderSpec) -> Option<SecretString> {
        spec.credential_env
            .as_deref()
            .and_then(|env| self.by_env.get(env))
            .map(|secret| SecretString::from(secret.expose_secret().to_owned()))
    }

    /// Whether `spec` has a usable credential (always true when it needs none).
    pub fn has_credential(&self, spec: &ProviderSpec) -> bool {
        match spec.credential_env.as_deref() {
            Some(env) => self.by_env.contains_key(env),
            None => true,
        }
    }
}
