//! CLI execution context.

use std::sync::Arc;

use anyhow::{Context as _, Result};

use harvest_client::{ApiClient, ReqwestTransport};
use harvest_store::Store;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Output handler.
    pub output: Output,
    /// API client, wired to the local token store.
    pub client: ApiClient,
}

impl Context {
    /// Load config, open the local store, and connect the client.
    pub fn load(
        config_path: Option<&str>,
        base_url: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config().unwrap_or_default()
        };

        let store = match config.storage.path.as_deref() {
            Some(path) => Store::open(path),
            None => Store::open_default(),
        }
        .context("Failed to open local state directory")?;

        let client_config = config.client_config(base_url)?;
        output.debug(&format!("backend: {}", client_config.base_url()));

        let client = ApiClient::new(
            client_config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(store),
        );

        Ok(Self { output, client })
    }

    /// Find config file in directory tree.
    fn find_config() -> Option<CliConfig> {
        let config_names = ["harvest.toml", ".harvest.toml"];

        let mut current = std::env::current_dir().ok()?;
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}
