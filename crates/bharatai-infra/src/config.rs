//! Router configuration loader.
//!
//! Reads `bharatai.toml` and deserializes it into [`RouterConfig`]. A missing
//! file yields the built-in defaults; a file that exists but cannot be read
//! or parsed is a startup error, so a typo never silently reverts to the
//! default chains.

use std::path::{Path, PathBuf};

use bharatai_types::config::RouterConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BHARATAI_CONFIG";

/// File looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "bharatai.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Pick the config path: explicit flag, then `BHARATAI_CONFIG`, then
/// `./bharatai.toml`.
pub fn config_path(explicit: Option<&Path>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Load the router configuration.
///
/// `explicit` is the `--config` flag. When no file exists at the resolved
/// path, [`RouterConfig::default()`] is returned.
pub async fn load_router_config(explicit: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    let path = config_path(explicit, std::env::var(CONFIG_ENV).ok());
    load_from(&path).await
}

/// Load from an exact path.
pub async fn load_from(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return Ok(RouterConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config: RouterConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        providers = config.providers.len(),
        "Loaded router config"
    );
    Ok(config)
}
