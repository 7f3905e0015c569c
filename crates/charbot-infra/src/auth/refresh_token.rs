//! OAuth2 refresh-token credential source.
//!
//! Exchanges a long-lived refresh token for a fresh ID token on every
//! `credential()` call (`grant_type=refresh_token`, public client). Works
//! with hosted identity providers that expose a standard `/oauth2/token`
//! endpoint. If the provider rotates refresh tokens, the new one replaces
//! the old in memory.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use charbot_core::auth::source::CredentialSource;
use charbot_types::credential::{Credential, Identity};
use charbot_types::error::AuthError;

/// Identity reported when no username is configured.
const DEFAULT_USERNAME: &str = "default";

#[derive(Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
}

pub struct RefreshTokenCredentialSource {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    username: Option<String>,
    refresh_token: RwLock<Option<SecretString>>,
}

impl RefreshTokenCredentialSource {
    pub fn new(
        token_url: String,
        client_id: String,
        username: Option<String>,
        refresh_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("charbot/0.1")
            .build()
            .unwrap_or_default();

        Self {
            client,
            token_url,
            client_id,
            username,
            refresh_token: RwLock::new(refresh_token.map(SecretString::from)),
        }
    }

    fn refresh_token(&self) -> Option<SecretString> {
        self.refresh_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_refresh_token(&self, token: Option<SecretString>) {
        *self
            .refresh_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl CredentialSource for RefreshTokenCredentialSource {
    fn name(&self) -> &str {
        "refresh_token"
    }

    async fn identity(&self) -> Result<Identity, AuthError> {
        if self.refresh_token().is_none() {
            return Err(AuthError::NotSignedIn);
        }
        Ok(Identity::new(
            self.username.as_deref().unwrap_or(DEFAULT_USERNAME),
        ))
    }

    async fn credential(&self, identity: &Identity) -> Result<Credential, AuthError> {
        let refresh_token = self.refresh_token().ok_or(AuthError::NotSignedIn)?;

        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token.expose_secret()),
        ];
        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(AuthError::Rejected(reason));
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!("token endpoint returned HTTP {status}")));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Unavailable(format!("invalid token response: {e}")))?;

        if let Some(rotated) = tokens.refresh_token {
            debug!(user = %identity, "Refresh token rotated");
            self.set_refresh_token(Some(SecretString::from(rotated)));
        }

        tokens
            .id_token
            .or(tokens.access_token)
            .map(Credential::new)
            .ok_or_else(|| AuthError::Unavailable("token response had no token".to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_refresh_token(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::{Value, json};

    /// Token endpoint stand-in: "rt-1" is valid and rotates to "rt-2",
    /// "rt-2" is valid without rotation, anything else is revoked.
    async fn token(Form(form): Form<HashMap<String, String>>) -> (AxumStatus, Json<Value>) {
        if form.get("grant_type").map(String::as_str) != Some("refresh_token")
            || form.get("client_id").map(String::as_str) != Some("client-abc")
        {
            return (AxumStatus::BAD_REQUEST, Json(json!({"error": "invalid_client"})));
        }
        match form.get("refresh_token").map(String::as_str) {
            Some("rt-1") => (
                AxumStatus::OK,
                Json(json!({"id_token": "id-1", "access_token": "access-1", "refresh_token": "rt-2"})),
            ),
            Some("rt-2") => (AxumStatus::OK, Json(json!({"access_token": "access-2"}))),
            _ => (AxumStatus::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))),
        }
    }

    async fn spawn_token_endpoint() -> SocketAddr {
        let app = Router::new().route("/oauth2/token", post(token));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn source(addr: SocketAddr, refresh_token: Option<&str>) -> RefreshTokenCredentialSource {
        RefreshTokenCredentialSource::new(
            format!("http://{addr}/oauth2/token"),
            "client-abc".to_string(),
            Some("luna".to_string()),
            refresh_token.map(str::to_string),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn exchanges_refresh_token_and_follows_rotation() {
        let addr = spawn_token_endpoint().await;
        let source = source(addr, Some("rt-1"));

        let identity = source.identity().await.unwrap();
        assert_eq!(identity, Identity::new("luna"));

        let first = source.credential(&identity).await.unwrap();
        assert_eq!(first.expose(), "id-1");

        // Rotated to rt-2, whose response only carries an access token.
        let second = source.credential(&identity).await.unwrap();
        assert_eq!(second.expose(), "access-2");
    }

    #[tokio::test]
    async fn revoked_refresh_token_is_rejected() {
        let addr = spawn_token_endpoint().await;
        let source = source(addr, Some("revoked"));

        let err = source.credential(&Identity::new("luna")).await.unwrap_err();

        assert_eq!(err, AuthError::Rejected("invalid_grant".to_string()));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = source(addr, Some("rt-1"));

        let err = source.credential(&Identity::new("luna")).await.unwrap_err();

        assert!(matches!(err, AuthError::Unavailable(_)));
    }

    #[tokio::test]
    async fn sign_out_forgets_refresh_token() {
        let addr = spawn_token_endpoint().await;
        let source = source(addr, Some("rt-1"));

        source.sign_out().await.unwrap();

        assert_eq!(source.identity().await.unwrap_err(), AuthError::NotSignedIn);
        assert_eq!(
            source.credential(&Identity::new("luna")).await.unwrap_err(),
            AuthError::NotSignedIn
        );
    }

    #[tokio::test]
    async fn missing_refresh_token_is_not_signed_in() {
        let addr = spawn_token_endpoint().await;
        let source = source(addr, None);
        assert_eq!(source.identity().await.unwrap_err(), AuthError::NotSignedIn);
    }
}
