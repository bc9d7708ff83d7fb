//! # Entity normalization
//!
//! The backend is not consistent about field names: a poll may arrive with
//! `poll_id` or `id`, a title may be `title` or `question`. This module is the
//! single place where raw JSON records become canonical [`Poll`], [`PollOption`]
//! and [`User`] values.
//!
//! Each canonical field has an [`Alias`] entry listing the wire keys to try, in
//! priority order. The first key holding a non-null, non-empty value wins. A
//! field with no usable key is left empty; normalization never fails.
//!
//! Normalizing the serialized form of a canonical record yields the same record.

use serde_json::{Map, Value};

use crate::models::{Poll, PollOption, User};

/// Canonical field name plus its wire aliases in priority order.
#[derive(Clone, Copy, Debug)]
pub struct Alias {
    pub canonical: &'static str,
    pub keys: &'static [&'static str],
}

impl Alias {
    pub const fn new(canonical: &'static str, keys: &'static [&'static str]) -> Self {
        Self { canonical, keys }
    }

    /// First aliased value that is present and not blank.
    pub fn resolve<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        self.keys
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !is_blank(value))
    }

    fn text(&self, record: &Map<String, Value>) -> String {
        self.resolve(record).map(scalar_text).unwrap_or_default()
    }
}

pub const POLL_ID: Alias = Alias::new("id", &["poll_id", "id"]);
pub const POLL_TITLE: Alias = Alias::new("title", &["title", "question"]);
pub const POLL_OPTIONS: Alias = Alias::new("options", &["options"]);

pub const OPTION_ID: Alias = Alias::new("id", &["option_id", "id"]);
pub const OPTION_CONTENT: Alias = Alias::new("content", &["content", "text"]);
pub const OPTION_CORRECT: Alias = Alias::new("correct", &["correct"]);
pub const OPTION_VOTES: Alias = Alias::new("votes", &["votes", "vote_count"]);

pub const USER_ID: Alias = Alias::new("id", &["user_id", "id"]);
pub const USER_NAME: Alias = Alias::new("username", &["username", "name"]);
pub const USER_EMAIL: Alias = Alias::new("email", &["email"]);

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn as_object(record: &Value) -> Option<&Map<String, Value>> {
    let object = record.as_object();
    if object.is_none() {
        tracing::warn!(?record, "skipping fields of non-object record");
    }
    object
}

/// Normalize one raw poll record.
pub fn normalize_poll(record: &Value) -> Poll {
    let Some(map) = as_object(record) else {
        return Poll::default();
    };
    let id = POLL_ID.text(map);
    let options = match POLL_OPTIONS.resolve(map) {
        Some(Value::Array(items)) => items.iter().map(|o| normalize_option(o, &id)).collect(),
        _ => Vec::new(),
    };
    let poll = Poll {
        title: POLL_TITLE.text(map),
        id,
        options,
    };
    if poll.is_malformed() {
        tracing::warn!(id = %poll.id, missing = ?missing_poll_fields(&poll), "incomplete poll record");
    }
    poll
}

/// Canonical names of the identifying poll fields that came out empty.
pub fn missing_poll_fields(poll: &Poll) -> Vec<&'static str> {
    [(POLL_ID, &poll.id), (POLL_TITLE, &poll.title)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(alias, _)| alias.canonical)
        .collect()
}

/// Normalize one raw option record belonging to the poll `poll_id`.
pub fn normalize_option(record: &Value, poll_id: &str) -> PollOption {
    let Some(map) = as_object(record) else {
        return PollOption {
            poll_id: poll_id.to_string(),
            ..PollOption::default()
        };
    };
    PollOption {
        id: OPTION_ID.text(map),
        content: OPTION_CONTENT.text(map),
        correct: flag(OPTION_CORRECT.resolve(map)),
        poll_id: poll_id.to_string(),
        votes: OPTION_VOTES.resolve(map).and_then(Value::as_u64),
    }
}

/// Normalize one raw user record.
pub fn normalize_user(record: &Value) -> User {
    let Some(map) = as_object(record) else {
        return User::default();
    };
    User {
        id: USER_ID.text(map),
        username: USER_NAME.text(map),
        email: USER_EMAIL.text(map),
    }
}

/// Extract the record collection from a list response.
///
/// Takes the `data` field when present and non-null, otherwise the payload
/// itself. Anything that is not an array at that point yields no records.
pub fn collection_from_payload(payload: Value) -> Vec<Value> {
    let candidate = match payload {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(map),
        },
        other => other,
    };
    match candidate {
        Value::Array(items) => items,
        other => {
            tracing::warn!(shape = %shape_of(&other), "list response is not a sequence, rendering none");
            Vec::new()
        }
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Envelope unwrapping followed by per-record poll normalization.
pub fn decode_polls(payload: Value) -> Vec<Poll> {
    collection_from_payload(payload)
        .iter()
        .map(normalize_poll)
        .collect()
}

/// Envelope unwrapping followed by per-record user normalization.
pub fn decode_users(payload: Value) -> Vec<User> {
    collection_from_payload(payload)
        .iter()
        .map(normalize_user)
        .collect()
}
