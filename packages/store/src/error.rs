//! Failure taxonomy of the remote store.
//!
//! Every variant is recoverable: callers turn it into a notice and carry on.

use serde_json::Value;
use thiserror::Error;

/// Plain-text error bodies longer than this are not shown to users.
const MAX_TEXT_MESSAGE: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered outside the 2xx range.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be parsed.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl StoreError {
    /// The server-supplied explanation, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            StoreError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text for a user-facing notice: the server's message, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Pull a human-readable message out of a response body.
///
/// JSON bodies are searched for `message`, then `error`. Short plain-text
/// bodies are used as they are; HTML pages and empty bodies yield nothing.
pub fn message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string),
        Ok(_) => None,
        Err(_) if body.starts_with('<') || body.len() > MAX_TEXT_MESSAGE => None,
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_preferred_over_error() {
        let body = r#"{"data":null,"error":"db down","message":"Could not save"}"#;
        assert_eq!(message_from_body(body).as_deref(), Some("Could not save"));
    }

    #[test]
    fn test_error_field_used_when_no_message() {
        let body = r#"{"data":null,"error":"Id de poll invalido"}"#;
        assert_eq!(message_from_body(body).as_deref(), Some("Id de poll invalido"));
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(
            message_from_body("Username already exists\n").as_deref(),
            Some("Username already exists")
        );
        assert_eq!(message_from_body("<html>502</html>"), None);
        assert_eq!(message_from_body("   "), None);
        assert_eq!(message_from_body("[1,2]"), None);
    }

    #[test]
    fn test_message_or_fallback() {
        let err = StoreError::Status {
            status: 400,
            message: Some("Email already exists".to_string()),
        };
        assert_eq!(err.message_or("Could not create user"), "Email already exists");

        let err = StoreError::Transport("connection refused".to_string());
        assert_eq!(err.message_or("Could not create user"), "Could not create user");

        let err = StoreError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.message_or("Could not delete poll"), "Could not delete poll");
    }
}
