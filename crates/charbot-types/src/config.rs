//! Client configuration types for CharBot.
//!
//! `ClientConfig` represents `config.toml`. All fields have defaults, so an
//! empty or missing file yields a working local setup.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL of the generation endpoint (`POST {prompt}` → `{completion}`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Assistant message seeded into every new conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Also send prior turns as a `history` array with each prompt.
    #[serde(default)]
    pub send_history: bool,

    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_endpoint() -> String {
    "http://localhost:5050/generate".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_greeting() -> String {
    "Hey there, I'm CharacterBot! Let me know which of your favorite movie or tv characters you'd like to speak with!".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            greeting: default_greeting(),
            send_history: false,
            auth: AuthConfig::default(),
        }
    }
}

/// Which credential source backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthSourceKind {
    /// Identity and token read from environment variables.
    #[default]
    Env,
    /// OAuth2 refresh-token grant against `token_url`.
    RefreshToken,
}

/// Credential source settings. Secrets themselves are never stored here,
/// only the names of the environment variables that hold them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub source: AuthSourceKind,

    #[serde(default = "default_user_var")]
    pub user_var: String,

    #[serde(default = "default_token_var")]
    pub token_var: String,

    #[serde(default = "default_refresh_token_var")]
    pub refresh_token_var: String,

    /// OAuth2 token endpoint (refresh-token source only).
    #[serde(default)]
    pub token_url: Option<String>,

    /// OAuth2 client id (refresh-token source only).
    #[serde(default)]
    pub client_id: Option<String>,
}

fn default_user_var() -> String {
    "CHARBOT_USER".to_string()
}

fn default_token_var() -> String {
    "CHARBOT_ID_TOKEN".to_string()
}

fn default_refresh_token_var() -> String {
    "CHARBOT_REFRESH_TOKEN".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            source: AuthSourceKind::default(),
            user_var: default_user_var(),
            token_var: default_token_var(),
            refresh_token_var: default_refresh_token_var(),
            token_url: None,
            client_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:5050/generate");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(!config.send_history);
        assert_eq!(config.auth.source, AuthSourceKind::Env);
        assert_eq!(config.auth.token_var, "CHARBOT_ID_TOKEN");
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
endpoint = "https://bots.example.com/generate"
send_history = true

[auth]
source = "refresh_token"
token_url = "https://auth.example.com/oauth2/token"
client_id = "abc123"
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint, "https://bots.example.com/generate");
        assert!(config.send_history);
        assert_eq!(config.auth.source, AuthSourceKind::RefreshToken);
        assert_eq!(config.auth.client_id.as_deref(), Some("abc123"));
        assert_eq!(config.auth.user_var, "CHARBOT_USER");
    }
}
