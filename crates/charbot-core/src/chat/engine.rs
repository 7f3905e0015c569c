//! ExchangeEngine -- one guarded request/response cycle per user submission.
//!
//! Every accepted `send` appends the user's message, renews the credential,
//! calls the generation endpoint, and appends exactly one assistant message
//! (a reply or a locally synthesized error). At most one exchange is in
//! flight at a time; the guard is an atomic flag, so the engine can be
//! shared across tasks behind an `Arc`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use charbot_types::connectivity::ConnectivityStatus;
use charbot_types::error::ExchangeError;
use charbot_types::event::ExchangeEvent;
use charbot_types::generation::{GenerationRequest, HistoryEntry};
use charbot_types::message::Message;

use crate::auth::source::CredentialSource;
use crate::auth::token_manager::TokenManager;
use crate::event::bus::EventBus;
use crate::generation::client::GenerationClient;
use crate::generation::fence::strip_code_fences;

use super::connectivity::Connectivity;
use super::transcript::TranscriptStore;

/// Shown when the endpoint rejects the credential.
pub const AUTH_ERROR_TEXT: &str = "Authentication error. Please try signing out and back in.";

/// Shown for every other failed exchange.
pub const CONNECTION_ERROR_TEXT: &str = "Sorry, I'm having trouble connecting to the server";

/// Construction options for [`ExchangeEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Assistant message placed at the top of the transcript.
    pub greeting: Option<String>,
    /// Send prior turns as `history` with each prompt.
    pub send_history: bool,
    /// Bus the engine publishes on. Subscribe before constructing the
    /// engine to observe the greeting and initial credential events.
    pub events: EventBus,
}

/// Why a `send` call was refused without any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    AwaitingReply,
    NoCredential,
}

/// Result of a `send` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Preconditions failed; nothing changed.
    Rejected(RejectReason),
    /// The endpoint answered and the reply was appended.
    Replied { user: Message, reply: Message },
    /// The exchange failed and an error message was appended.
    Failed {
        user: Message,
        reply: Message,
        error: ExchangeError,
    },
}

impl SendOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SendOutcome::Rejected(_))
    }

    /// The assistant message appended by this exchange, if it was accepted.
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SendOutcome::Rejected(_) => None,
            SendOutcome::Replied { reply, .. } | SendOutcome::Failed { reply, .. } => Some(reply),
        }
    }
}

/// Owns the conversation transcript and the in-flight flag, and drives
/// exchanges through a [`TokenManager`] and a [`GenerationClient`].
pub struct ExchangeEngine<C, G> {
    tokens: TokenManager<C>,
    client: G,
    transcript: TranscriptStore,
    connectivity: Arc<Connectivity>,
    awaiting_reply: AtomicBool,
    send_history: bool,
    events: EventBus,
}

impl<C: CredentialSource, G: GenerationClient> ExchangeEngine<C, G> {
    pub fn new(source: C, client: G, options: EngineOptions) -> Self {
        let EngineOptions {
            greeting,
            send_history,
            events,
        } = options;

        let connectivity = Arc::new(Connectivity::new(events.clone()));
        let transcript = TranscriptStore::new(events.clone());
        if let Some(greeting) = greeting {
            transcript.append(Message::assistant(greeting));
        }

        Self {
            tokens: TokenManager::new(source, Arc::clone(&connectivity), events.clone()),
            client,
            transcript,
            connectivity,
            awaiting_reply: AtomicBool::new(false),
            send_history,
            events,
        }
    }

    pub fn tokens(&self) -> &TokenManager<C> {
        &self.tokens
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity.get()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply.load(Ordering::Acquire)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Run one exchange for `user_text`.
    ///
    /// Rejected calls (blank text, an exchange already in flight, or no
    /// credential held) return immediately and change nothing. Accepted
    /// calls never return an error: failures become an assistant message
    /// with error status and set connectivity to disconnected.
    pub async fn send(&self, user_text: &str) -> SendOutcome {
        if user_text.trim().is_empty() {
            debug!("Ignoring empty message");
            return SendOutcome::Rejected(RejectReason::EmptyInput);
        }
        if self.is_awaiting_reply() {
            debug!("Ignoring message while awaiting reply");
            return SendOutcome::Rejected(RejectReason::AwaitingReply);
        }
        if self.tokens.current().is_none() {
            debug!("Ignoring message without credential");
            return SendOutcome::Rejected(RejectReason::NoCredential);
        }
        let Some(_in_flight) = InFlightGuard::acquire(&self.awaiting_reply, &self.events) else {
            return SendOutcome::Rejected(RejectReason::AwaitingReply);
        };

        let history = self.send_history.then(|| self.history());
        let user = Message::user(user_text);
        self.transcript.append(user.clone());
        self.events
            .publish(ExchangeEvent::AwaitingReplyChanged { awaiting: true });

        self.tokens.renew_before_use().await;

        let request = GenerationRequest {
            prompt: user_text.to_string(),
            history,
        };
        let result = match self.tokens.current() {
            Some(credential) => self.client.generate(&request, &credential).await,
            // Signed out while renewing.
            None => Err(ExchangeError::Unauthorized),
        };

        match result {
            Ok(generated) => {
                let reply = Message::assistant(strip_code_fences(&generated.completion));
                self.transcript.append(reply.clone());
                self.connectivity.set(ConnectivityStatus::Connected);
                SendOutcome::Replied { user, reply }
            }
            Err(error) => {
                warn!(error = %error, unauthorized = error.is_unauthorized(), "Exchange failed");
                let text = if error.is_unauthorized() {
                    AUTH_ERROR_TEXT
                } else {
                    CONNECTION_ERROR_TEXT
                };
                let reply = Message::assistant_error(text);
                self.transcript.append(reply.clone());
                self.connectivity.set(ConnectivityStatus::Disconnected);
                SendOutcome::Failed { user, reply, error }
            }
        }
    }

    /// Prior turns for the `history` field. Locally synthesized error
    /// messages are never sent to the endpoint.
    fn history(&self) -> Vec<HistoryEntry> {
        self.transcript
            .all()
            .into_iter()
            .filter(|m| !m.is_error())
            .map(|m| HistoryEntry {
                role: m.sender,
                content: m.text,
            })
            .collect()
    }
}

/// Holds the in-flight flag for the duration of one exchange and releases
/// it on drop, including when the `send` future is dropped mid-flight.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    events: &'a EventBus,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, events: &'a EventBus) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag, events })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.events
            .publish(ExchangeEvent::AwaitingReplyChanged { awaiting: false });
    }
}
