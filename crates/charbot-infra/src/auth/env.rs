//! Environment variable credential source.
//!
//! Reads the signed-in user from one variable and the bearer token from
//! another. Both are re-read on every call, so a token exported by an
//! external login helper is picked up on the next renewal without a restart.

use charbot_core::auth::source::CredentialSource;
use charbot_types::credential::{Credential, Identity};
use charbot_types::error::AuthError;

pub struct EnvCredentialSource {
    user_var: String,
    token_var: String,
}

impl EnvCredentialSource {
    pub fn new(user_var: impl Into<String>, token_var: impl Into<String>) -> Self {
        Self {
            user_var: user_var.into(),
            token_var: token_var.into(),
        }
    }
}

/// A set, non-empty, valid-Unicode variable.
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl CredentialSource for EnvCredentialSource {
    fn name(&self) -> &str {
        "env"
    }

    async fn identity(&self) -> Result<Identity, AuthError> {
        read_var(&self.user_var)
            .map(Identity::new)
            .ok_or(AuthError::NotSignedIn)
    }

    async fn credential(&self, _identity: &Identity) -> Result<Credential, AuthError> {
        read_var(&self.token_var)
            .map(Credential::new)
            .ok_or_else(|| AuthError::Rejected(format!("{} is not set", self.token_var)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_source_reads_identity_and_token() {
        // SAFETY: variable names are unique to this test.
        unsafe {
            std::env::set_var("CHARBOT_TEST_USER_1", "luna");
            std::env::set_var("CHARBOT_TEST_TOKEN_1", "tok-1");
        }

        let source = EnvCredentialSource::new("CHARBOT_TEST_USER_1", "CHARBOT_TEST_TOKEN_1");
        let identity = source.identity().await.unwrap();
        assert_eq!(identity, Identity::new("luna"));
        let credential = source.credential(&identity).await.unwrap();
        assert_eq!(credential.expose(), "tok-1");

        // Rotated token is picked up on the next call.
        // SAFETY: as above.
        unsafe { std::env::set_var("CHARBOT_TEST_TOKEN_1", "tok-2") };
        let credential = source.credential(&identity).await.unwrap();
        assert_eq!(credential.expose(), "tok-2");

        // SAFETY: as above.
        unsafe {
            std::env::remove_var("CHARBOT_TEST_USER_1");
            std::env::remove_var("CHARBOT_TEST_TOKEN_1");
        }
    }

    #[tokio::test]
    async fn test_env_source_missing_user_is_not_signed_in() {
        let source = EnvCredentialSource::new("CHARBOT_NONEXISTENT_USER_XYZ", "CHARBOT_TEST_TOKEN_X");
        assert_eq!(source.identity().await.unwrap_err(), AuthError::NotSignedIn);
    }

    #[tokio::test]
    async fn test_env_source_missing_token_is_rejected() {
        let source = EnvCredentialSource::new("CHARBOT_TEST_USER_X", "CHARBOT_NONEXISTENT_TOKEN_XYZ");
        let err = source.credential(&Identity::new("luna")).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected("CHARBOT_NONEXISTENT_TOKEN_XYZ is not set".to_string())
        );
    }
}
