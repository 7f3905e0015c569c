//! BoxCredentialSource -- object-safe dynamic dispatch wrapper for CredentialSource.
//!
//! 1. Define an object-safe `CredentialSourceDyn` trait with boxed futures
//! 2. Blanket-impl `CredentialSourceDyn` for all `T: CredentialSource`
//! 3. `BoxCredentialSource` wraps `Box<dyn CredentialSourceDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use charbot_types::credential::{Credential, Identity};
use charbot_types::error::AuthError;

use super::source::CredentialSource;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`CredentialSource`] with boxed futures.
pub trait CredentialSourceDyn: Send + Sync {
    fn name(&self) -> &str;

    fn identity_boxed(&self) -> BoxFuture<'_, Result<Identity, AuthError>>;

    fn credential_boxed<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> BoxFuture<'a, Result<Credential, AuthError>>;

    fn sign_out_boxed(&self) -> BoxFuture<'_, Result<(), AuthError>>;
}

impl<T: CredentialSource> CredentialSourceDyn for T {
    fn name(&self) -> &str {
        CredentialSource::name(self)
    }

    fn identity_boxed(&self) -> BoxFuture<'_, Result<Identity, AuthError>> {
        Box::pin(self.identity())
    }

    fn credential_boxed<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> BoxFuture<'a, Result<Credential, AuthError>> {
        Box::pin(self.credential(identity))
    }

    fn sign_out_boxed(&self) -> BoxFuture<'_, Result<(), AuthError>> {
        Box::pin(self.sign_out())
    }
}

/// Type-erased credential source, selected at runtime from configuration.
///
/// `BoxCredentialSource` itself implements [`CredentialSource`], so it can be
/// handed to a `TokenManager` like any concrete source.
pub struct BoxCredentialSource {
    inner: Box<dyn CredentialSourceDyn>,
}

impl BoxCredentialSource {
    pub fn new<T: CredentialSource + 'static>(source: T) -> Self {
        Self {
            inner: Box::new(source),
        }
    }
}

impl CredentialSource for BoxCredentialSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn identity(&self) -> impl Future<Output = Result<Identity, AuthError>> + Send {
        self.inner.identity_boxed()
    }

    fn credential(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<Credential, AuthError>> + Send {
        async move { self.inner.credential_boxed(identity).await }
    }

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send {
        self.inner.sign_out_boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource;

    impl CredentialSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn identity(&self) -> Result<Identity, AuthError> {
            Ok(Identity::new("luna"))
        }

        async fn credential(&self, identity: &Identity) -> Result<Credential, AuthError> {
            Ok(Credential::new(format!("token-for-{identity}")))
        }
    }

    #[tokio::test]
    async fn boxed_source_delegates() {
        let boxed = BoxCredentialSource::new(FixedSource);
        assert_eq!(CredentialSource::name(&boxed), "fixed");

        let identity = boxed.identity().await.unwrap();
        let credential = boxed.credential(&identity).await.unwrap();
        assert_eq!(credential.expose(), "token-for-luna");

        // Default sign_out is a no-op.
        assert!(boxed.sign_out().await.is_ok());
    }
}
