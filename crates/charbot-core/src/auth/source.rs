//! CredentialSource trait definition.
//!
//! The identity provider that issues bearer credentials. Implementations
//! live in charbot-infra (e.g., `EnvCredentialSource`).

use std::future::Future;

use charbot_types::credential::{Credential, Identity};
use charbot_types::error::AuthError;

/// Issues and refreshes bearer credentials for a signed-in identity.
pub trait CredentialSource: Send + Sync {
    /// Human-readable source name (e.g., "env", "refresh_token").
    fn name(&self) -> &str;

    /// The currently signed-in identity, or `AuthError::NotSignedIn`.
    fn identity(&self) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// Obtain a credential for `identity`.
    ///
    /// Called once at session start and again before every send, so
    /// implementations should return the freshest token they can.
    fn credential(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<Credential, AuthError>> + Send;

    /// End the signed-in session with the identity provider.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send {
        async { Ok(()) }
    }
}
