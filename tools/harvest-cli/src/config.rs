//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use harvest_client::{ClientConfig, BASE_URL_ENV};

/// CLI configuration file (`harvest.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local state settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Resolve the backend base URL into a client config.
    ///
    /// Precedence: the `--base-url` flag, then `HARVEST_API_BASE_URL`, then
    /// the config file, then the client's built-in default.
    pub fn client_config(&self, flag: Option<&str>) -> Result<ClientConfig> {
        if let Some(url) = flag {
            return Ok(ClientConfig::new(url)?);
        }

        let env_set = std::env::var(BASE_URL_ENV)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        if env_set {
            return Ok(ClientConfig::from_env()?);
        }

        if let Some(url) = self.api.base_url.as_deref() {
            return Ok(ClientConfig::new(url)?);
        }

        Ok(ClientConfig::from_env()?)
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Local state settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for tokens and the cart code. Defaults to the platform
    /// data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
