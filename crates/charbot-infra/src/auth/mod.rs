//! Credential source implementations.
//!
//! - `env`: identity and token read from environment variables
//! - `refresh_token`: OAuth2 refresh-token grant against a token endpoint
//!
//! [`credential_source_from_config`] picks one at runtime from `[auth]`.

pub mod env;
pub mod refresh_token;

use std::time::Duration;

use charbot_core::auth::box_source::BoxCredentialSource;
use charbot_types::config::{AuthConfig, AuthSourceKind};
use charbot_types::error::ConfigError;

pub use env::EnvCredentialSource;
pub use refresh_token::RefreshTokenCredentialSource;

/// Timeout for token endpoint requests.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the credential source selected by `auth.source`.
pub fn credential_source_from_config(auth: &AuthConfig) -> Result<BoxCredentialSource, ConfigError> {
    match auth.source {
        AuthSourceKind::Env => Ok(BoxCredentialSource::new(EnvCredentialSource::new(
            auth.user_var.clone(),
            auth.token_var.clone(),
        ))),
        AuthSourceKind::RefreshToken => {
            let token_url = auth
                .token_url
                .clone()
                .ok_or_else(|| ConfigError::Missing("auth.token_url".to_string()))?;
            let client_id = auth
                .client_id
                .clone()
                .ok_or_else(|| ConfigError::Missing("auth.client_id".to_string()))?;
            let username = std::env::var(&auth.user_var).ok();
            let refresh_token = std::env::var(&auth.refresh_token_var).ok();

            Ok(BoxCredentialSource::new(RefreshTokenCredentialSource::new(
                token_url,
                client_id,
                username,
                refresh_token,
                TOKEN_REQUEST_TIMEOUT,
            )))
        }
    }
}
