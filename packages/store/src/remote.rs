//! # Remote store contract
//!
//! [`RemoteStore`] is the async interface the UI controllers talk to. It exposes
//! list / create / delete / update for polls, options and users. Implementations:
//!
//! - `api::HttpStore`: the real backend over HTTP.
//! - [`crate::MemoryStore`]: in-process, for tests.
//!
//! List operations always hand back a sequence; envelope and shape problems are
//! absorbed by [`crate::normalize`]. Mutations return an [`Ack`] on a 2xx answer
//! and a recoverable [`StoreError`] otherwise.

use serde_json::Value;

use crate::error::StoreError;
use crate::models::{NewPoll, NewUser, Poll, User};

/// Acknowledgement of a successful mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ack {
    /// Success message supplied by the server, if any.
    pub message: Option<String>,
}

impl Ack {
    /// Read the optional `message` field of a success body.
    pub fn from_body(body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string))
            .filter(|message| !message.trim().is_empty());
        Self { message }
    }

    /// The server's message, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Async CRUD interface of the poll backend.
pub trait RemoteStore {
    fn list_polls(&self) -> impl std::future::Future<Output = Result<Vec<Poll>, StoreError>>;
    fn create_poll(
        &self,
        poll: &NewPoll,
    ) -> impl std::future::Future<Output = Result<Ack, StoreError>>;
    fn delete_poll(&self, id: &str) -> impl std::future::Future<Output = Result<Ack, StoreError>>;
    fn update_option(
        &self,
        id: &str,
        correct: bool,
    ) -> impl std::future::Future<Output = Result<Ack, StoreError>>;

    fn list_users(&self) -> impl std::future::Future<Output = Result<Vec<User>, StoreError>>;
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<Ack, StoreError>>;
    fn delete_user(&self, id: &str) -> impl std::future::Future<Output = Result<Ack, StoreError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_from_body() {
        let ack = Ack::from_body(r#"{"data":null,"message":"Encuesta eliminada correctamente"}"#);
        assert_eq!(ack.message.as_deref(), Some("Encuesta eliminada correctamente"));
        assert_eq!(Ack::from_body(""), Ack::default());
        assert_eq!(Ack::from_body(r#"{"user":{"id":1}}"#).message_or("User created"), "User created");
    }
}
