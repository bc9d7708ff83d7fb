//! # Canonical view-models and request bodies
//!
//! Every record read from the backend goes through [`crate::normalize`] and comes
//! out as one of the canonical types below, whatever field names the server used.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Poll`] | A poll with its canonical `id`, display `title` and ordered options. |
//! | [`PollOption`] | One answer of a poll. Carries the owning poll id so click handlers can find their way back. |
//! | [`User`] | A registered user. There is deliberately no password field. |
//! | [`NewPoll`] / [`NewOption`] | Body of `POST /polls/create`. |
//! | [`NewUser`] | Body of `POST /users/create`. |
//! | [`OptionUpdate`] | Body of `PUT /options/{id}`. |
//!
//! Missing identifiers or titles are kept as empty strings so a single bad
//! record renders blank instead of breaking the whole list.

use serde::{Deserialize, Serialize};

/// A poll as the client renders it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Canonical id (`poll_id` or `id` on the wire), empty when absent
    pub id: String,
    /// Display title (`title` or `question` on the wire)
    pub title: String,
    pub options: Vec<PollOption>,
}

impl Poll {
    /// True when the record lacks an id or a title.
    pub fn is_malformed(&self) -> bool {
        self.id.is_empty() || self.title.is_empty()
    }
}

/// A single answer of a poll.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub content: String,
    pub correct: bool,
    /// Id of the owning poll
    pub poll_id: String,
    /// Vote count when the server reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

/// A user as listed by `GET /users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Body of `POST /polls/create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<NewOption>,
    pub user_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOption {
    pub content: String,
    pub correct: bool,
}

impl NewOption {
    /// A freshly created option is never marked correct.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            correct: false,
        }
    }
}

/// Body of `POST /users/create`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `PUT /options/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionUpdate {
    pub correct: bool,
}
