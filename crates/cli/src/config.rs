// CLI configuration file: `~/.taskboard/config.toml`.
//
// The server URL is resolved from, in order: the `--server` flag, the
// `TASKBOARD_SERVER_URL` environment variable, the config file, and finally
// the local development default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const SERVER_URL_ENV: &str = "TASKBOARD_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Path to the config file: `~/.taskboard/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".taskboard").join("config.toml"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the taskboard server (e.g. `http://127.0.0.1:3000`).
    pub server_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid server URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl CliConfig {
    /// Load from `~/.taskboard/config.toml`. A missing file yields defaults;
    /// an unreadable or malformed one is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "ignoring unreadable config file");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Resolve the server base URL for this invocation.
pub fn resolve_server_url(flag: Option<&str>) -> Result<Url, ConfigError> {
    resolve_server_url_from(flag, std::env::var(SERVER_URL_ENV).ok(), &CliConfig::load())
}

pub fn resolve_server_url_from(
    flag: Option<&str>,
    env: Option<String>,
    config: &CliConfig,
) -> Result<Url, ConfigError> {
    let raw = flag
        .map(str::to_owned)
        .or(env)
        .or_else(|| config.server_url.clone())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
}
