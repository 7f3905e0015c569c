//! Client configuration loader for CharBot.
//!
//! Reads `config.toml` from the platform config directory
//! (`~/.config/charbot/` on Linux) and deserializes it into [`ClientConfig`].
//! The default location falls back to defaults when the file is missing or
//! malformed; an explicitly requested file must exist and parse.

use std::path::{Path, PathBuf};

use charbot_types::config::ClientConfig;
use charbot_types::error::ConfigError;

/// `{config_dir}/charbot/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("charbot").join("config.toml"))
}

/// Read and parse `path`, reporting any failure.
pub async fn try_load_client_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    toml::from_str::<ClientConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Load configuration from `path`, falling back to defaults.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_client_config(path: &Path) -> ClientConfig {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!("No config.toml found at {}, using defaults", path.display());
        return ClientConfig::default();
    }

    match try_load_client_config(path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    }
}
