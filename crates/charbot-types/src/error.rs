use thiserror::Error;

/// Errors from the credential source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no signed-in identity")]
    NotSignedIn,

    #[error("credential request rejected: {0}")]
    Rejected(String),

    #[error("credential source unavailable: {0}")]
    Unavailable(String),
}

/// Errors from one request/response round-trip with the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("endpoint rejected the credential")]
    Unauthorized,

    #[error("endpoint returned HTTP {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode endpoint response: {0}")]
    Decode(String),
}

impl ExchangeError {
    /// Whether the failure means the user must sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ExchangeError::Unauthorized)
    }
}

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("missing required setting: {0}")]
    Missing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Rejected("invalid_grant".to_string());
        assert_eq!(err.to_string(), "credential request rejected: invalid_grant");
    }

    #[test]
    fn test_exchange_error_display() {
        let err = ExchangeError::Status {
            code: 500,
            detail: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "endpoint returned HTTP 500: boom");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ExchangeError::Unauthorized.is_unauthorized());
        assert!(!ExchangeError::Transport("refused".to_string()).is_unauthorized());
    }
}
