//! Application state shared by the CLI commands.

use std::path::PathBuf;

use charbot_infra::config::{default_config_path, load_client_config, try_load_client_config};
use charbot_types::config::ClientConfig;

use crate::cli::Cli;

pub struct AppState {
    pub config: ClientConfig,
    /// Where the configuration was (or would have been) read from.
    pub config_path: Option<PathBuf>,
}

impl AppState {
    /// Load configuration: an explicit `--config` file must exist and parse,
    /// the default location silently falls back to defaults.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let (config, config_path) = match &cli.config {
            Some(path) => (try_load_client_config(path).await?, Some(path.clone())),
            None => {
                let path = default_config_path();
                let config = match &path {
                    Some(path) => load_client_config(path).await,
                    None => ClientConfig::default(),
                };
                (config, path)
            }
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Apply `charbot chat` flags on top of the file configuration.
    pub fn with_overrides(mut self, endpoint: Option<String>, history: bool) -> Self {
        if let Some(endpoint) = endpoint {
            self.config.endpoint = endpoint;
        }
        if history {
            self.config.send_history = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            config: ClientConfig::default(),
            config_path: None,
        }
    }

    #[test]
    fn test_overrides_replace_endpoint_and_enable_history() {
        let state = state().with_overrides(Some("http://example.com/generate".to_string()), true);
        assert_eq!(state.config.endpoint, "http://example.com/generate");
        assert!(state.config.send_history);
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let state = state().with_overrides(None, false);
        assert_eq!(state.config, ClientConfig::default());
    }
}
