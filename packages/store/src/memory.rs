use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use tokio::sync::watch;

use crate::endpoint::Endpoint;
use crate::error::StoreError;
use crate::models::{NewPoll, NewUser, Poll, User};
use crate::normalize::{decode_polls, decode_users, normalize_option, normalize_poll, normalize_user};
use crate::remote::{Ack, RemoteStore};

/// A request as seen by [`MemoryStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub endpoint: Endpoint,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct State {
    polls: Vec<Value>,
    users: Vec<Value>,
    calls: Vec<Call>,
    failures: VecDeque<StoreError>,
}

/// In-memory RemoteStore for tests and offline use.
///
/// Records are kept as raw JSON and served inside a `{ "data": [...] }`
/// envelope, so reads go through the same normalization as real responses.
///
/// [`hold`](Self::hold) leaves every later call pending (after it is recorded)
/// until [`release`](Self::release), which lets tests observe in-flight state.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    /// `true` while calls are held
    gate: Arc<watch::Sender<bool>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            gate: Arc::new(watch::Sender::new(false)),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep calls pending until [`release`](Self::release).
    pub fn hold(&self) {
        self.gate.send_replace(true);
    }

    /// Let held and future calls complete.
    pub fn release(&self) {
        self.gate.send_replace(false);
    }

    /// Seed raw poll records, in whatever field naming the caller likes.
    pub fn with_polls(self, records: Vec<Value>) -> Self {
        self.state().polls = records;
        self
    }

    /// Seed raw user records.
    pub fn with_users(self, records: Vec<Value>) -> Self {
        self.state().users = records;
        self
    }

    /// Make the next call fail with `error`. Queued failures apply in order.
    pub fn fail_next(&self, error: StoreError) {
        self.state().failures.push_back(error);
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.state().calls.iter().map(|c| c.endpoint.clone()).collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, wait while held, then consume a queued failure, if any.
    async fn begin(&self, endpoint: Endpoint, body: Option<Value>) -> Result<MutexGuard<'_, State>, StoreError> {
        tracing::debug!(%endpoint, "memory store call");
        self.state().calls.push(Call { endpoint, body });

        let mut gate = self.gate.subscribe();
        // Only fails if the sender is gone, and `self` owns it
        let _ = gate.wait_for(|held| !*held).await;

        let mut state = self.state();
        let failure = state.failures.pop_front();
        match failure {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

fn not_found(kind: &str, id: &str) -> StoreError {
    StoreError::Status {
        status: 404,
        message: Some(format!("{kind} {id} not found")),
    }
}

fn numeric_ids(ids: impl Iterator<Item = String>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0)
}

impl State {
    fn next_poll_id(&self) -> u64 {
        numeric_ids(self.polls.iter().map(|p| normalize_poll(p).id)) + 1
    }

    fn next_option_id(&self) -> u64 {
        let ids = self
            .polls
            .iter()
            .flat_map(|p| normalize_poll(p).options)
            .map(|o| o.id);
        numeric_ids(ids) + 1
    }

    fn next_user_id(&self) -> u64 {
        numeric_ids(self.users.iter().map(|u| normalize_user(u).id)) + 1
    }
}

impl RemoteStore for MemoryStore {
    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let state = self.begin(Endpoint::ListPolls, None).await?;
        Ok(decode_polls(json!({ "data": state.polls })))
    }

    async fn create_poll(&self, poll: &NewPoll) -> Result<Ack, StoreError> {
        let body = serde_json::to_value(poll).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut state = self.begin(Endpoint::CreatePoll, Some(body)).await?;
        let id = state.next_poll_id();
        let first_option = state.next_option_id();
        let options: Vec<Value> = poll
            .options
            .iter()
            .zip(first_option..)
            .map(|(option, option_id)| {
                json!({
                    "id": option_id,
                    "content": option.content,
                    "correct": option.correct,
                    "poll_id": id,
                })
            })
            .collect();
        state.polls.push(json!({
            "id": id,
            "title": poll.question,
            "user_id": poll.user_id,
            "options": options,
        }));
        Ok(Ack::default())
    }

    async fn delete_poll(&self, id: &str) -> Result<Ack, StoreError> {
        let mut state = self.begin(Endpoint::DeletePoll(id.to_string()), None).await?;
        let index = state
            .polls
            .iter()
            .position(|p| normalize_poll(p).id == id)
            .ok_or_else(|| not_found("poll", id))?;
        state.polls.remove(index);
        Ok(Ack::default())
    }

    async fn update_option(&self, id: &str, correct: bool) -> Result<Ack, StoreError> {
        let body = json!({ "correct": correct });
        let mut state = self.begin(Endpoint::UpdateOption(id.to_string()), Some(body)).await?;
        let option = state
            .polls
            .iter_mut()
            .filter_map(|p| p.get_mut("options").and_then(Value::as_array_mut))
            .flatten()
            .find(|o| normalize_option(o, "").id == id)
            .ok_or_else(|| not_found("option", id))?;
        if let Some(map) = option.as_object_mut() {
            map.insert("correct".to_string(), Value::Bool(correct));
        }
        Ok(Ack::default())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let state = self.begin(Endpoint::ListUsers, None).await?;
        Ok(decode_users(json!({ "data": state.users })))
    }

    async fn create_user(&self, user: &NewUser) -> Result<Ack, StoreError> {
        let body = serde_json::to_value(user).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut state = self.begin(Endpoint::CreateUser, Some(body)).await?;
        let id = state.next_user_id();
        state.users.push(json!({
            "id": id,
            "username": user.username,
            "email": user.email,
        }));
        Ok(Ack::default())
    }

    async fn delete_user(&self, id: &str) -> Result<Ack, StoreError> {
        let mut state = self.begin(Endpoint::DeleteUser(id.to_string()), None).await?;
        let index = state
            .users
            .iter()
            .position(|u| normalize_user(u).id == id)
            .ok_or_else(|| not_found("user", id))?;
        state.users.remove(index);
        Ok(Ack::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOption;

    fn color_poll() -> NewPoll {
        NewPoll {
            question: "Favorite color?".to_string(),
            options: vec![NewOption::new("Red"), NewOption::new("Blue")],
            user_id: 3,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_poll() {
        let store = MemoryStore::new();

        assert!(store.list_polls().await.unwrap().is_empty());

        store.create_poll(&color_poll()).await.unwrap();

        let polls = store.list_polls().await.unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].id, "1");
        assert_eq!(polls[0].title, "Favorite color?");
        assert_eq!(polls[0].options.len(), 2);
        assert_eq!(polls[0].options[1].content, "Blue");
        assert_eq!(polls[0].options[1].poll_id, "1");
        assert!(polls[0].options.iter().all(|o| !o.correct));
    }

    #[tokio::test]
    async fn test_seeded_records_are_normalized() {
        let store = MemoryStore::new().with_polls(vec![
            json!({ "poll_id": 7, "question": "Q1", "options": [] }),
            json!({ "id": 8, "title": "Q2" }),
        ]);

        let polls = store.list_polls().await.unwrap();
        assert_eq!(polls[0].id, "7");
        assert_eq!(polls[0].title, "Q1");
        assert_eq!(polls[1].id, "8");

        // New ids continue after the seeded ones
        store.create_poll(&color_poll()).await.unwrap();
        let polls = store.list_polls().await.unwrap();
        assert_eq!(polls[2].id, "9");
    }

    #[tokio::test]
    async fn test_delete_poll() {
        let store = MemoryStore::new().with_polls(vec![
            json!({ "id": 7, "title": "Seven" }),
            json!({ "id": 8, "title": "Eight" }),
        ]);

        store.delete_poll("7").await.unwrap();
        let polls = store.list_polls().await.unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].id, "8");

        let err = store.delete_poll("7").await.unwrap_err();
        assert_eq!(err.server_message(), Some("poll 7 not found"));
    }

    #[tokio::test]
    async fn test_update_option() {
        let store = MemoryStore::new().with_polls(vec![json!({
            "id": 1,
            "title": "Q",
            "options": [{ "option_id": 4, "content": "A", "correct": false }],
        })]);

        store.update_option("4", true).await.unwrap();
        let polls = store.list_polls().await.unwrap();
        assert!(polls[0].options[0].correct);

        assert!(store.update_option("5", true).await.is_err());
    }

    #[tokio::test]
    async fn test_users() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        };
        store.create_user(&user).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ana");

        store.delete_user(&users[0].id).await.unwrap();
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let store = MemoryStore::new();
        store.create_poll(&color_poll()).await.unwrap();
        store.update_option("1", true).await.unwrap();

        let calls = store.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].endpoint, Endpoint::CreatePoll);
        assert_eq!(calls[0].body.as_ref().unwrap()["user_id"], json!(3));
        assert_eq!(calls[1].endpoint, Endpoint::UpdateOption("1".to_string()));
        assert_eq!(calls[1].body, Some(json!({ "correct": true })));
    }

    #[tokio::test]
    async fn test_queued_failures() {
        let store = MemoryStore::new();
        store.fail_next(StoreError::Transport("offline".to_string()));

        assert!(store.list_polls().await.is_err());
        assert!(store.list_polls().await.is_ok());
        // Failed calls are still recorded
        assert_eq!(store.endpoints(), vec![Endpoint::ListPolls, Endpoint::ListPolls]);
    }

    #[tokio::test]
    async fn test_held_calls_wait_for_release() {
        let store = MemoryStore::new().with_polls(vec![json!({ "id": 1, "title": "Q" })]);
        store.hold();

        let observe = async {
            while store.calls().is_empty() {
                tokio::task::yield_now().await;
            }
            // Recorded but not answered yet
            assert_eq!(store.endpoints(), vec![Endpoint::ListPolls]);
            store.release();
        };
        let (polls, ()) = tokio::join!(store.list_polls(), observe);

        assert_eq!(polls.unwrap().len(), 1);
        // Released stores answer immediately again
        assert!(store.list_polls().await.is_ok());
    }
}
