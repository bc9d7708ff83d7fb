use dioxus::prelude::*;
use store::{ClientConfig, NewUser, RemoteStore};

use crate::cell::ViewCell;
use crate::form::FormError;
use crate::notifier::Notices;
use crate::user_list::{refresh_users, UsersView};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    submitting: bool,
}

impl UserDraft {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate into a request body. Username and email are trimmed, the
    /// password is sent as typed.
    pub fn to_new_user(&self) -> Result<NewUser, FormError> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() {
            return Err(FormError::Required("username"));
        }
        if email.is_empty() {
            return Err(FormError::Required("email"));
        }
        if self.password.is_empty() {
            return Err(FormError::Required("password"));
        }
        Ok(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
    }
}

/// Submit the user form. The password field is emptied whatever the outcome.
pub async fn submit_user<S: RemoteStore>(
    store: &S,
    draft: &impl ViewCell<UserDraft>,
    view: &impl ViewCell<UsersView>,
    notices: &impl ViewCell<Notices>,
    config: &ClientConfig,
) -> bool {
    let guard = config.ui.guard_submissions;
    let prepared = draft.update(|d| {
        if guard && d.submitting {
            return Err(FormError::InFlight);
        }
        let user = d.to_new_user();
        d.password.clear();
        d.submitting = guard && user.is_ok();
        user
    });

    let user = match prepared {
        Ok(user) => user,
        Err(FormError::InFlight) => {
            tracing::debug!("user submission already in flight");
            return false;
        }
        Err(e) => {
            notices.update(|n| n.error(e.to_string()));
            return false;
        }
    };

    tracing::debug!(username = %user.username, "creating user");
    let result = store.create_user(&user).await;
    draft.update(|d| d.submitting = false);

    match result {
        Ok(ack) => {
            notices.update(|n| n.success(ack.message_or("User created")));
            draft.update(UserDraft::clear);
            refresh_users(store, view, notices).await;
            true
        }
        Err(e) => {
            tracing::warn!(username = %user.username, "creating user failed: {e}");
            notices.update(|n| n.error(e.message_or("Could not create user")));
            false
        }
    }
}

#[component]
pub fn UserForm(mut draft: Signal<UserDraft>, on_submit: EventHandler<()>) -> Element {
    let current = draft.read().clone();

    rsx! {
        form {
            id: "userForm",
            class: "form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            label { r#for: "username", "Username" }
            input {
                id: "username",
                r#type: "text",
                value: current.username,
                oninput: move |evt: FormEvent| draft.write().username = evt.value(),
            }
            label { r#for: "email", "Email" }
            input {
                id: "email",
                r#type: "email",
                value: current.email,
                oninput: move |evt: FormEvent| draft.write().email = evt.value(),
            }
            label { r#for: "password", "Password" }
            input {
                id: "password",
                r#type: "password",
                value: current.password,
                oninput: move |evt: FormEvent| draft.write().password = evt.value(),
            }
            button {
                r#type: "submit",
                disabled: current.submitting,
                "Create user"
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

    fn filled() -> Rc<RefCell<UserDraft>> {
        Rc::new(RefCell::new(UserDraft {
            username: " ana ".to_string(),
            email: "ana@example.com".to_string(),
            password: "hunter2".to_string(),
            submitting: false,
        }))
    }

    fn cells() -> (Rc<RefCell<UsersView>>, Rc<RefCell<Notices>>) {
        (
            Rc::new(RefCell::new(UsersView::default())),
            Rc::new(RefCell::new(Notices::default())),
        )
    }

    #[test]
    fn test_required_fields() {
        let mut draft = UserDraft::default();
        assert_eq!(draft.to_new_user(), Err(FormError::Required("username")));
        draft.username = "ana".to_string();
        assert_eq!(draft.to_new_user(), Err(FormError::Required("email")));
        draft.email = "  ".to_string();
        assert_eq!(draft.to_new_user(), Err(FormError::Required("email")));
        draft.email = "ana@example.com".to_string();
        assert_eq!(draft.to_new_user(), Err(FormError::Required("password")));
    }

    #[tokio::test]
    async fn test_submit_creates_and_clears() {
        let store = MemoryStore::new();
        let draft = filled();
        let (view, notices) = cells();

        assert!(submit_user(&store, &draft, &view, &notices, &ClientConfig::default()).await);

        assert_eq!(store.endpoints(), vec![Endpoint::CreateUser, Endpoint::ListUsers]);
        assert_eq!(
            store.calls()[0].body,
            Some(json!({
                "username": "ana",
                "email": "ana@example.com",
                "password": "hunter2",
            }))
        );
        assert_eq!(*draft.borrow(), UserDraft::default());
        assert_eq!(view.borrow().dom_ids(), vec!["user-1"]);
    }

    #[tokio::test]
    async fn test_password_cleared_after_failure() {
        let store = MemoryStore::new();
        store.fail_next(StoreError::Status {
            status: 400,
            message: Some("Username already exists".to_string()),
        });
        let draft = filled();
        let (view, notices) = cells();

        assert!(!submit_user(&store, &draft, &view, &notices, &ClientConfig::default()).await);

        let draft = draft.borrow();
        assert!(draft.password.is_empty());
        assert_eq!(draft.username, " ana ");
        assert_eq!(draft.email, "ana@example.com");
        assert!(!draft.is_submitting());
        assert_eq!(notices.borrow().current().unwrap().text, "Username already exists");
    }

    #[tokio::test]
    async fn test_password_cleared_after_rejected_draft() {
        let store = MemoryStore::new();
        let draft = filled();
        draft.borrow_mut().email.clear();
        let (view, notices) = cells();

        assert!(!submit_user(&store, &draft, &view, &notices, &ClientConfig::default()).await);

        assert!(store.calls().is_empty());
        assert!(draft.borrow().password.is_empty());
        assert_eq!(notices.borrow().current().unwrap().text, "Please fill in the email");
    }

    #[tokio::test]
    async fn test_guard_refuses_submit_in_flight() {
        let store = MemoryStore::new();
        let draft = filled();
        draft.borrow_mut().submitting = true;
        let (view, notices) = cells();

        assert!(!submit_user(&store, &draft, &view, &notices, &ClientConfig::default()).await);
        assert!(store.calls().is_empty());
        assert_eq!(draft.borrow().password, "hunter2");
    }
}
