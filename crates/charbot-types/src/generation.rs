//! Request/response shapes for the remote generation endpoint.

use serde::{Deserialize, Serialize};

use crate::message::Sender;

/// Body of a generation request: `{"prompt": ..., "history"?: [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: None,
        }
    }
}

/// One prior turn sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Sender,
    pub content: String,
}

/// Successful endpoint response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReply {
    pub completion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_history_omits_field() {
        let json = serde_json::to_string(&GenerationRequest::new("hi")).unwrap();
        assert_eq!(json, r#"{"prompt":"hi"}"#);
    }

    #[test]
    fn test_request_with_history() {
        let request = GenerationRequest {
            prompt: "and you?".to_string(),
            history: Some(vec![HistoryEntry {
                role: Sender::User,
                content: "hello".to_string(),
            }]),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""history":[{"role":"user","content":"hello"}]"#));
    }

    #[test]
    fn test_reply_ignores_extra_fields() {
        let reply: GenerationReply =
            serde_json::from_str(r#"{"completion":"hey","persona":"Yoda"}"#).unwrap();
        assert_eq!(reply.completion, "hey");
    }
}
