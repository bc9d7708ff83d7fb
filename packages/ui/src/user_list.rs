use std::time::Duration;

use dioxus::prelude::*;
use store::{RemoteStore, User};

use crate::cell::ViewCell;
use crate::notifier::Notices;
use crate::view::{dom_id, fade_out, Block, Entry, ListView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBlock {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserBlock {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl Block for UserBlock {
    const KIND: &'static str = "user";
    const EMPTY_TEXT: &'static str = "No users yet.";

    fn id(&self) -> &str {
        &self.id
    }
}

pub type UsersView = ListView<UserBlock>;

/// Fetch all users and re-render the list. Returns false when the fetch failed.
pub async fn refresh_users<S: RemoteStore>(
    store: &S,
    view: &impl ViewCell<UsersView>,
    notices: &impl ViewCell<Notices>,
) -> bool {
    match store.list_users().await {
        Ok(users) => {
            tracing::debug!(count = users.len(), "rendering users");
            view.update(|v| v.render(users.into_iter().map(UserBlock::from).collect()));
            true
        }
        Err(e) => {
            tracing::error!("loading users failed: {e}");
            notices.update(|n| n.error("Could not load users"));
            false
        }
    }
}

pub async fn delete_user<S: RemoteStore>(
    store: &S,
    view: &impl ViewCell<UsersView>,
    notices: &impl ViewCell<Notices>,
    id: &str,
    fade: Duration,
) {
    match store.delete_user(id).await {
        Ok(ack) => {
            notices.update(|n| n.success(ack.message_or("User deleted")));
            fade_out(view, &dom_id(UserBlock::KIND, id), fade).await;
            refresh_users(store, view, notices).await;
        }
        Err(e) => {
            tracing::warn!(%id, "deleting user failed: {e}");
            notices.update(|n| n.error(e.message_or("Could not delete user")));
        }
    }
}

#[component]
pub fn UserList(view: Signal<UsersView>, on_delete: EventHandler<String>) -> Element {
    let (placeholder, rows) = {
        let list = view.read();
        let rows: Vec<(String, Entry<UserBlock>)> = list
            .entries()
            .iter()
            .map(|entry| (list.entry_key(entry), entry.clone()))
            .collect();
        (list.placeholder(), rows)
    };

    rsx! {
        div {
            id: "usersContainer",
            class: "list",
            if let Some(text) = placeholder {
                p { class: "placeholder", "{text}" }
            }
            for (key, entry) in rows {
                UserCard {
                    key: "{key}",
                    user: entry.block,
                    fading: entry.fading,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn UserCard(user: UserBlock, fading: bool, on_delete: EventHandler<String>) -> Element {
    let user_id = user.id.clone();
    let class = if fading { "card fading" } else { "card" };

    rsx! {
        div {
            id: "{user.dom_id()}",
            class,
            h3 { "{user.username}" }
            p { class: "user-email", "{user.email}" }
            button {
                r#type: "button",
                class: "delete-btn",
                "data-id": "{user.id}",
                onclick: move |_| on_delete.call(user_id.clone()),
                "Delete user"
            }
        }
    }
}
