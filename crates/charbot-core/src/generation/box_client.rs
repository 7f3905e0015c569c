//! BoxGenerationClient -- object-safe dynamic dispatch wrapper for GenerationClient.
//!
//! Same shape as `BoxCredentialSource`: an object-safe `GenerationClientDyn`
//! with a blanket impl, and a boxed wrapper that implements the RPITIT trait.

use std::future::Future;
use std::pin::Pin;

use charbot_types::credential::Credential;
use charbot_types::error::ExchangeError;
use charbot_types::generation::{GenerationReply, GenerationRequest};

use super::client::GenerationClient;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`GenerationClient`] with boxed futures.
pub trait GenerationClientDyn: Send + Sync {
    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<GenerationReply, ExchangeError>>;
}

impl<T: GenerationClient> GenerationClientDyn for T {
    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<GenerationReply, ExchangeError>> {
        Box::pin(self.generate(request, credential))
    }
}

/// Type-erased generation client.
pub struct BoxGenerationClient {
    inner: Box<dyn GenerationClientDyn>,
}

impl BoxGenerationClient {
    pub fn new<T: GenerationClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }
}

impl GenerationClient for BoxGenerationClient {
    fn generate(
        &self,
        request: &GenerationRequest,
        credential: &Credential,
    ) -> impl Future<Output = Result<GenerationReply, ExchangeError>> + Send {
        async move { self.inner.generate_boxed(request, credential).await }
    }
}
