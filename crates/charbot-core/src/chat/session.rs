//! Authenticated chat session.
//!
//! Wraps an [`ExchangeEngine`] with the sign-in lifecycle: resolve the
//! signed-in identity, acquire the first credential, allow re-authentication,
//! and discard the whole conversation on sign-out.

use tracing::{info, warn};

use charbot_types::connectivity::ConnectivityStatus;
use charbot_types::error::AuthError;
use charbot_types::message::Message;

use crate::auth::source::CredentialSource;
use crate::generation::client::GenerationClient;

use super::engine::{EngineOptions, ExchangeEngine, SendOutcome};

/// One signed-in conversation. Dropped (via [`ChatSession::sign_out`]) when
/// the user signs out; nothing is persisted.
pub struct ChatSession<C, G> {
    engine: ExchangeEngine<C, G>,
}

impl<C: CredentialSource, G: GenerationClient> ChatSession<C, G> {
    /// Start a session for whoever is signed in to `source`.
    ///
    /// Fails only with `NotSignedIn` (or whatever error the source reports
    /// while resolving the identity). A failed first credential request
    /// still yields a session; it stays disconnected and refuses sends
    /// until [`ChatSession::reauthenticate`] succeeds.
    pub async fn start(source: C, client: G, options: EngineOptions) -> Result<Self, AuthError> {
        let identity = source.identity().await?;
        info!(user = %identity, source = source.name(), "Starting chat session");

        let engine = ExchangeEngine::new(source, client, options);
        if let Err(err) = engine.tokens().initialize(identity).await {
            warn!(error = %err, "Session started without a credential");
        }

        Ok(Self { engine })
    }

    /// Retry credential acquisition for the current identity, resolving the
    /// identity again if none is remembered.
    pub async fn reauthenticate(&self) -> Result<(), AuthError> {
        let tokens = self.engine.tokens();
        let identity = match tokens.identity() {
            Some(identity) => identity,
            None => tokens.source().identity().await?,
        };
        tokens.initialize(identity).await
    }

    /// Clear the credential, sign out of the identity provider, and discard
    /// the conversation.
    ///
    /// The conversation is gone even if the provider sign-out fails.
    pub async fn sign_out(self) -> Result<(), AuthError> {
        let tokens = self.engine.tokens();
        tokens.clear();
        let result = tokens.source().sign_out().await;
        match &result {
            Ok(()) => info!("Signed out"),
            Err(err) => warn!(error = %err, "Identity provider sign-out failed"),
        }
        result
    }

    pub async fn send(&self, text: &str) -> SendOutcome {
        self.engine.send(text).await
    }

    pub fn engine(&self) -> &ExchangeEngine<C, G> {
        &self.engine
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.engine.transcript().all()
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.engine.connectivity()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.engine.is_awaiting_reply()
    }

    pub fn has_credential(&self) -> bool {
        self.engine.tokens().current().is_some()
    }

    /// What a status indicator should show: the last exchange succeeded
    /// and a credential is held.
    pub fn is_online(&self) -> bool {
        self.connectivity().is_connected() && self.has_credential()
    }
}
