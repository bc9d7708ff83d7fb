//! Optimistic "correct option" toggle.
//!
//! Clicking an option button flips its state in the view first and only then
//! tells the server. A failed update is logged and the flipped state is kept;
//! the list re-fetch that follows is the only reconciliation.

use dioxus::prelude::*;
use store::{PollOption, RemoteStore};

use crate::cell::ViewCell;
use crate::notifier::Notices;
use crate::poll_list::{refresh_polls, PollBlock, PollsView};
use crate::view::{dom_id, Block};

/// View state of one option button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionButton {
    pub option_id: String,
    pub poll_id: String,
    pub content: String,
    pub correct: bool,
    pub votes: Option<u64>,
}

impl From<PollOption> for OptionButton {
    fn from(option: PollOption) -> Self {
        Self {
            option_id: option.id,
            poll_id: option.poll_id,
            content: option.content,
            correct: option.correct,
            votes: option.votes,
        }
    }
}

impl OptionButton {
    pub fn class(&self) -> &'static str {
        if self.correct {
            "option-btn option-btn--correct"
        } else {
            "option-btn"
        }
    }

    pub fn label(&self) -> &'static str {
        if self.correct {
            "Selected"
        } else {
            "Select"
        }
    }

    /// Value of the `data-correct` attribute.
    pub fn data_correct(&self) -> &'static str {
        if self.correct {
            "true"
        } else {
            "false"
        }
    }

    /// Flip the state and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.correct = !self.correct;
        self.correct
    }
}

/// Flip an option in place. Returns the new value, or `None` if the option is
/// not currently rendered.
pub fn flip_option(
    view: &impl ViewCell<PollsView>,
    poll_id: &str,
    option_id: &str,
) -> Option<bool> {
    view.update(|v| {
        v.block_mut(&dom_id(PollBlock::KIND, poll_id))?
            .options
            .iter_mut()
            .find(|o| o.option_id == option_id)
            .map(OptionButton::toggle)
    })
}

/// Handle a click on an option button.
pub async fn toggle_option<S: RemoteStore>(
    store: &S,
    view: &impl ViewCell<PollsView>,
    notices: &impl ViewCell<Notices>,
    poll_id: &str,
    option_id: &str,
) {
    let Some(correct) = flip_option(view, poll_id, option_id) else {
        tracing::warn!(%poll_id, %option_id, "clicked option is no longer rendered");
        return;
    };

    // No rollback on failure: the re-fetch below decides what is shown.
    if let Err(e) = store.update_option(option_id, correct).await {
        tracing::warn!(%option_id, correct, "updating option failed: {e}");
    }

    refresh_polls(store, view, notices).await;
}

/// Button for one option. Identified by its data attributes, not its class.
#[component]
pub fn OptionToggle(option: OptionButton, on_toggle: EventHandler<(String, String)>) -> Element {
    let ids = (option.poll_id.clone(), option.option_id.clone());

    rsx! {
        button {
            r#type: "button",
            class: option.class(),
            "data-option-id": "{option.option_id}",
            "data-poll-id": "{option.poll_id}",
            "data-correct": option.data_correct(),
            onclick: move |_| on_toggle.call(ids.clone()),
            "{option.label()}"
        }
    }
}
