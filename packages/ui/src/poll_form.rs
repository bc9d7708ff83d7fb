//! Poll creation form.
//!
//! The draft always has `min_options` fixed rows. Extra rows can be added up
//! to `max_options` and removed again; fixed rows can't be removed.

use dioxus::prelude::*;
use store::{ClientConfig, NewOption, NewPoll, RemoteStore};

use crate::cell::ViewCell;
use crate::form::FormError;
use crate::notifier::Notices;
use crate::poll_list::{refresh_polls, PollsView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionDraft {
    /// Stable key of the row while the draft lives
    pub key: u64,
    pub content: String,
    pub removable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    options: Vec<OptionDraft>,
    submitting: bool,
    fixed: usize,
    next_key: u64,
}

impl PollDraft {
    pub fn new(fixed: usize) -> Self {
        let mut draft = Self {
            question: String::new(),
            options: Vec::new(),
            submitting: false,
            fixed,
            next_key: 0,
        };
        draft.clear();
        draft
    }

    pub fn options(&self) -> &[OptionDraft] {
        &self.options
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Append a removable row unless the draft already has `max` rows.
    pub fn add_option(&mut self, max: usize) -> Result<u64, FormError> {
        if self.options.len() >= max {
            return Err(FormError::TooManyOptions(max));
        }
        Ok(self.push_row(true))
    }

    pub fn remove_option(&mut self, key: u64) -> bool {
        let before = self.options.len();
        self.options.retain(|o| o.key != key || !o.removable);
        self.options.len() != before
    }

    pub fn set_option(&mut self, key: u64, content: impl Into<String>) {
        if let Some(option) = self.options.iter_mut().find(|o| o.key == key) {
            option.content = content.into();
        }
    }

    /// Validate the draft into a request body. Blank options are dropped.
    pub fn to_new_poll(&self, user_id: u32, min: usize, max: usize) -> Result<NewPoll, FormError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(FormError::EmptyQuestion);
        }

        let options: Vec<NewOption> = self
            .options
            .iter()
            .map(|o| o.content.trim())
            .filter(|content| !content.is_empty())
            .map(NewOption::new)
            .collect();
        if options.len() < min {
            return Err(FormError::TooFewOptions(min));
        }
        if options.len() > max {
            return Err(FormError::TooManyOptions(max));
        }

        Ok(NewPoll {
            question: question.to_string(),
            options,
            user_id,
        })
    }

    /// Reset the question and go back to the fixed rows.
    pub fn clear(&mut self) {
        self.question.clear();
        self.options.clear();
        for _ in 0..self.fixed {
            self.push_row(false);
        }
    }

    fn push_row(&mut self, removable: bool) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.options.push(OptionDraft {
            key,
            content: String::new(),
            removable,
        });
        key
    }
}

/// "Add option" click handler.
pub fn add_option(draft: &impl ViewCell<PollDraft>, notices: &impl ViewCell<Notices>, max: usize) -> bool {
    match draft.update(|d| d.add_option(max)) {
        Ok(_) => true,
        Err(e) => {
            notices.update(|n| n.error(e.to_string()));
            false
        }
    }
}

/// Submit the draft. Returns true when the poll was created.
pub async fn submit_poll<S: RemoteStore>(
    store: &S,
    draft: &impl ViewCell<PollDraft>,
    view: &impl ViewCell<PollsView>,
    notices: &impl ViewCell<Notices>,
    config: &ClientConfig,
) -> bool {
    let guard = config.ui.guard_submissions;
    let prepared = draft.update(|d| {
        if guard && d.submitting {
            return Err(FormError::InFlight);
        }
        let poll = d.to_new_poll(config.api.user_id, config.ui.min_options, config.ui.max_options)?;
        d.submitting = guard;
        Ok(poll)
    });

    let poll = match prepared {
        Ok(poll) => poll,
        Err(FormError::InFlight) => {
            tracing::debug!("poll submission already in flight");
            return false;
        }
        Err(e) => {
            notices.update(|n| n.error(e.to_string()));
            return false;
        }
    };

    tracing::debug!(question = %poll.question, options = poll.options.len(), "creating poll");
    let result = store.create_poll(&poll).await;
    draft.update(|d| d.submitting = false);

    match result {
        Ok(ack) => {
            notices.update(|n| n.success(ack.message_or("Poll created")));
            draft.update(PollDraft::clear);
            refresh_polls(store, view, notices).await;
            true
        }
        Err(e) => {
            tracing::warn!("creating poll failed: {e}");
            notices.update(|n| n.error(e.message_or("Could not create poll")));
            false
        }
    }
}

#[component]
pub fn PollForm(
    mut draft: Signal<PollDraft>,
    on_add: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    let (question, rows, submitting) = {
        let d = draft.read();
        (d.question.clone(), d.options().to_vec(), d.is_submitting())
    };

    rsx! {
        form {
            id: "pollForm",
            class: "form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            label { r#for: "question", "Question" }
            input {
                id: "question",
                r#type: "text",
                placeholder: "What should we ask?",
                value: question,
                oninput: move |evt: FormEvent| draft.write().question = evt.value(),
            }
            div {
                id: "optsContainer",
                for row in rows {
                    OptionRow { key: "{row.key}", draft, row: row.clone() }
                }
            }
            button {
                id: "addOptBtn",
                r#type: "button",
                onclick: move |_| on_add.call(()),
                "Add option"
            }
            button {
                r#type: "submit",
                disabled: submitting,
                if submitting { "Creating..." } else { "Create poll" }
            }
        }
    }
}

#[component]
fn OptionRow(mut draft: Signal<PollDraft>, row: OptionDraft) -> Element {
    let key = row.key;

    rsx! {
        div {
            class: "option-row",
            input {
                class: "option-input",
                r#type: "text",
                placeholder: "Option",
                value: row.content,
                oninput: move |evt: FormEvent| draft.write().set_option(key, evt.value()),
            }
            if row.removable {
                button {
                    r#type: "button",
                    class: "remove-opt-btn",
                    onclick: move |_| {
                        draft.write().remove_option(key);
                    },
                    "Remove"
                }
            }
        }
    }
}
