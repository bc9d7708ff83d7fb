use std::time::Duration;

use dioxus::prelude::*;
use store::{Poll, RemoteStore};

use crate::cell::ViewCell;
use crate::notifier::Notices;
use crate::option_toggle::{OptionButton, OptionToggle};
use crate::view::{dom_id, fade_out, Block, Entry, ListView};

/// Rendered state of a single poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollBlock {
    pub id: String,
    pub title: String,
    pub options: Vec<OptionButton>,
}

impl From<Poll> for PollBlock {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id,
            title: poll.title,
            options: poll.options.into_iter().map(OptionButton::from).collect(),
        }
    }
}

impl Block for PollBlock {
    const KIND: &'static str = "poll";
    const EMPTY_TEXT: &'static str = "No polls yet.";

    fn id(&self) -> &str {
        &self.id
    }
}

pub type PollsView = ListView<PollBlock>;

/// Fetch all polls and re-render the list. Returns false when the fetch failed.
pub async fn refresh_polls<S: RemoteStore>(
    store: &S,
    view: &impl ViewCell<PollsView>,
    notices: &impl ViewCell<Notices>,
) -> bool {
    match store.list_polls().await {
        Ok(polls) => {
            tracing::debug!(count = polls.len(), "rendering polls");
            view.update(|v| v.render(polls.into_iter().map(PollBlock::from).collect()));
            true
        }
        Err(e) => {
            tracing::error!("loading polls failed: {e}");
            notices.update(|n| n.error("Could not load polls"));
            false
        }
    }
}

/// Delete a poll: fade its block out once the server agrees, then re-fetch.
pub async fn delete_poll<S: RemoteStore>(
    store: &S,
    view: &impl ViewCell<PollsView>,
    notices: &impl ViewCell<Notices>,
    id: &str,
    fade: Duration,
) {
    match store.delete_poll(id).await {
        Ok(ack) => {
            notices.update(|n| n.success(ack.message_or("Poll deleted")));
            fade_out(view, &dom_id(PollBlock::KIND, id), fade).await;
            refresh_polls(store, view, notices).await;
        }
        Err(e) => {
            tracing::warn!(%id, "deleting poll failed: {e}");
            notices.update(|n| n.error(e.message_or("Could not delete poll")));
        }
    }
}

#[component]
pub fn PollList(
    view: Signal<PollsView>,
    on_delete: EventHandler<String>,
    on_toggle: EventHandler<(String, String)>,
) -> Element {
    let (placeholder, cards) = {
        let list = view.read();
        let cards: Vec<(String, Entry<PollBlock>)> = list
            .entries()
            .iter()
            .map(|entry| (list.entry_key(entry), entry.clone()))
            .collect();
        (list.placeholder(), cards)
    };

    rsx! {
        div {
            id: "pollsContainer",
            class: "list",
            if let Some(text) = placeholder {
                p { class: "placeholder", "{text}" }
            }
            for (key, entry) in cards {
                PollCard {
                    key: "{key}",
                    poll: entry.block,
                    fading: entry.fading,
                    on_delete,
                    on_toggle,
                }
            }
        }
    }
}

#[component]
fn PollCard(
    poll: PollBlock,
    fading: bool,
    on_delete: EventHandler<String>,
    on_toggle: EventHandler<(String, String)>,
) -> Element {
    let poll_id = poll.id.clone();
    let class = if fading { "card fading" } else { "card" };

    rsx! {
        div {
            id: "{poll.dom_id()}",
            class,
            h3 { "{poll.title}" }
            ul {
                for option in poll.options.iter().cloned() {
                    li {
                        key: "{option.option_id}",
                        span { class: "option-content", "{option.content}" }
                        if let Some(votes) = option.votes {
                            span { class: "option-votes", "{votes} votes" }
                        }
                        OptionToggle { option: option.clone(), on_toggle }
                    }
                }
            }
            button {
                r#type: "button",
                class: "delete-btn",
                "data-id": "{poll.id}",
                onclick: move |_| on_delete.call(poll_id.clone()),
                "Delete poll"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use store::{Endpoint, MemoryStore, StoreError};

    use super::*;

    fn cells() -> (Rc<RefCell<PollsView>>, Rc<RefCell<Notices>>) {
        (
            Rc::new(RefCell::new(PollsView::default())),
            Rc::new(RefCell::new(Notices::default())),
        )
    }

    #[tokio::test]
    async fn test_refresh_renders_one_block_per_poll() {
        let store = MemoryStore::new().with_polls(vec![
            json!({ "poll_id": 7, "question": "Q7" }),
            json!({ "id": 8, "title": "Q8" }),
            json!({ "title": "No id" }),
        ]);
        let (view, notices) = cells();

        assert!(refresh_polls(&store, &view, &notices).await);

        let view = view.borrow();
        assert_eq!(view.dom_ids(), vec!["poll-7", "poll-8", "poll-"]);
        assert_eq!(view.entries()[0].block.title, "Q7");
        assert_eq!(view.placeholder(), None);
    }

    #[tokio::test]
    async fn test_refresh_empty_shows_placeholder() {
        let store = MemoryStore::new();
        let (view, notices) = cells();

        refresh_polls(&store, &view, &notices).await;

        assert_eq!(view.borrow().placeholder(), Some("No polls yet."));
        assert!(view.borrow().entries().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_list_and_notifies() {
        let store = MemoryStore::new().with_polls(vec![json!({ "id": 1, "title": "Q" })]);
        let (view, notices) = cells();
        refresh_polls(&store, &view, &notices).await;

        store.fail_next(StoreError::Transport("offline".to_string()));
        assert!(!refresh_polls(&store, &view, &notices).await);

        assert_eq!(view.borrow().dom_ids(), vec!["poll-1"]);
        assert_eq!(notices.borrow().current().unwrap().text, "Could not load polls");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_fades_then_removes() {
        let store = MemoryStore::new().with_polls(vec![
            json!({ "id": 7, "title": "Seven" }),
            json!({ "id": 8, "title": "Eight" }),
        ]);
        let (view, notices) = cells();
        refresh_polls(&store, &view, &notices).await;
        store.clear_calls();

        let probe = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let list = view.borrow();
            assert!(list.contains("poll-7"));
            assert!(list.entries()[0].fading);
        };
        tokio::join!(
            delete_poll(&store, &view, &notices, "7", Duration::from_millis(300)),
            probe
        );

        assert_eq!(view.borrow().dom_ids(), vec!["poll-8"]);
        let deletes: Vec<Endpoint> = store
            .endpoints()
            .into_iter()
            .filter(|e| matches!(e, Endpoint::DeletePoll(_)))
            .collect();
        assert_eq!(deletes, vec![Endpoint::DeletePoll("7".to_string())]);
        assert_eq!(deletes[0].path(), "/polls/7");
        assert_eq!(notices.borrow().current().unwrap().text, "Poll deleted");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_last_poll_shows_placeholder() {
        let store = MemoryStore::new().with_polls(vec![json!({ "id": 7, "title": "Seven" })]);
        let (view, notices) = cells();
        refresh_polls(&store, &view, &notices).await;

        delete_poll(&store, &view, &notices, "7", Duration::from_millis(300)).await;

        assert_eq!(view.borrow().placeholder(), Some("No polls yet."));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_block() {
        let store = MemoryStore::new().with_polls(vec![json!({ "id": 7, "title": "Seven" })]);
        let (view, notices) = cells();
        refresh_polls(&store, &view, &notices).await;

        store.fail_next(StoreError::Status {
            status: 500,
            message: Some("database unavailable".to_string()),
        });
        delete_poll(&store, &view, &notices, "7", Duration::ZERO).await;

        assert!(view.borrow().contains("poll-7"));
        assert!(!view.borrow().entries()[0].fading);
        let notices = notices.borrow();
        let notice = notices.current().unwrap();
        assert_eq!(notice.text, "database unavailable");
    }
}
