//! HttpGenerationClient -- concrete [`GenerationClient`] over HTTP.
//!
//! POSTs `{"prompt": ...}` (plus optional `history`) as JSON to the
//! configured endpoint with `Authorization: Bearer <credential>`, and expects
//! `{"completion": "..."}` back. The credential is only exposed while the
//! request headers are built.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use charbot_core::generation::client::GenerationClient;
use charbot_types::credential::Credential;
use charbot_types::error::ExchangeError;
use charbot_types::generation::{GenerationReply, GenerationRequest};

/// Longest error body kept in an [`ExchangeError::Status`] detail.
const MAX_DETAIL_CHARS: usize = 200;

/// Error body shape returned by the endpoint on server failures.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpGenerationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("charbot/0.1")
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl GenerationClient for HttpGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
        credential: &Credential,
    ) -> Result<GenerationReply, ExchangeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ExchangeError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Status {
                code: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        response
            .json::<GenerationReply>()
            .await
            .map_err(|e| ExchangeError::Decode(e.to_string()))
    }
}

/// Prefer the `error` field of a JSON error body; otherwise keep the start
/// of the raw body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.chars().take(MAX_DETAIL_CHARS).collect(),
    }
}
