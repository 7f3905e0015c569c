//! Token manager -- owns the bearer credential for one session.
//!
//! The credential is acquired once when the session starts and renewed
//! opportunistically before every send. Renewal failure is tolerated: the
//! previously held credential stays in place and is used as a fallback.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use charbot_types::connectivity::ConnectivityStatus;
use charbot_types::credential::{Credential, Identity};
use charbot_types::error::AuthError;
use charbot_types::event::ExchangeEvent;

use crate::chat::connectivity::Connectivity;
use crate::event::bus::EventBus;

use super::source::CredentialSource;

#[derive(Default)]
struct TokenState {
    identity: Option<Identity>,
    credential: Option<Credential>,
}

/// Single writer of the session credential.
///
/// Readers get a cloned snapshot via [`TokenManager::current`]. The lock is
/// never held across an `.await`.
pub struct TokenManager<C> {
    source: C,
    state: RwLock<TokenState>,
    connectivity: Arc<Connectivity>,
    events: EventBus,
}

impl<C: CredentialSource> TokenManager<C> {
    pub fn new(source: C, connectivity: Arc<Connectivity>, events: EventBus) -> Self {
        Self {
            source,
            state: RwLock::new(TokenState::default()),
            connectivity,
            events,
        }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Acquire a credential for a newly signed-in identity.
    ///
    /// The identity is remembered for later renewals whether or not the
    /// request succeeds. On failure an already held credential is left in
    /// place; there is no automatic retry.
    pub async fn initialize(&self, identity: Identity) -> Result<(), AuthError> {
        self.write_state().identity = Some(identity.clone());

        match self.source.credential(&identity).await {
            Ok(credential) => {
                self.replace_credential(&identity, credential);
                info!(user = %identity, source = self.source.name(), "Credential acquired");
                self.connectivity.set(ConnectivityStatus::Connected);
                Ok(())
            }
            Err(err) => {
                warn!(user = %identity, source = self.source.name(), error = %err, "Failed to acquire credential");
                self.connectivity.set(ConnectivityStatus::Disconnected);
                Err(err)
            }
        }
    }

    /// Best-effort refresh immediately before a send.
    ///
    /// Returns `true` if a fresh credential was stored. Failures are logged
    /// and otherwise ignored.
    pub async fn renew_before_use(&self) -> bool {
        let Some(identity) = self.identity() else {
            debug!("No identity to renew credential for");
            return false;
        };

        match self.source.credential(&identity).await {
            Ok(credential) => self.replace_credential(&identity, credential),
            Err(err) => {
                warn!(
                    user = %identity,
                    error = %err,
                    has_fallback = self.current().is_some(),
                    "Credential renewal failed, using existing credential"
                );
                false
            }
        }
    }

    /// Snapshot of the held credential, if any.
    pub fn current(&self) -> Option<Credential> {
        self.read_state().credential.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    /// Discard the credential and the remembered identity.
    pub fn clear(&self) {
        let had_credential = {
            let mut state = self.write_state();
            state.identity = None;
            state.credential.take().is_some()
        };
        if had_credential {
            self.events
                .publish(ExchangeEvent::CredentialChanged { held: false });
        }
    }

    /// Store `credential` unless the session was cleared or switched to a
    /// different identity while the request was outstanding.
    fn replace_credential(&self, identity: &Identity, credential: Credential) -> bool {
        let stored = {
            let mut state = self.write_state();
            if state.identity.as_ref() == Some(identity) {
                state.credential = Some(credential);
                true
            } else {
                false
            }
        };
        if stored {
            self.events
                .publish(ExchangeEvent::CredentialChanged { held: true });
        } else {
            debug!(user = %identity, "Discarding credential for stale identity");
        }
        stored
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, TokenState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, TokenState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
