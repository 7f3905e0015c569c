//! GenerationClient trait definition.
//!
//! One request/response call to the remote generation endpoint. The
//! production implementation is `HttpGenerationClient` in charbot-infra.

use std::future::Future;

use charbot_types::credential::Credential;
use charbot_types::error::ExchangeError;
use charbot_types::generation::{GenerationReply, GenerationRequest};

pub trait GenerationClient: Send + Sync {
    /// Send `request` with `credential` as the bearer and await the reply.
    ///
    /// Implementations map an unauthorized response to
    /// [`ExchangeError::Unauthorized`] and every other failure to one of the
    /// remaining variants. They never retry.
    fn generate(
        &self,
        request: &GenerationRequest,
        credential: &Credential,
    ) -> impl Future<Output = Result<GenerationReply, ExchangeError>> + Send;
}
