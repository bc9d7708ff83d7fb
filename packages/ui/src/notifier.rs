//! Transient success/error messages.
//!
//! Only one notice is visible at a time; a newer one replaces the older. Each
//! notice gets a sequence number so a dismissal timer started for an old notice
//! never hides a newer one.

use std::time::Duration;

use dioxus::prelude::*;

use crate::cell::ViewCell;
use crate::timer::sleep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "message success",
            NoticeKind::Error => "message error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    current: Option<Notice>,
    next_seq: u64,
}

impl Notices {
    /// Replace the visible notice. Returns its sequence number.
    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_seq += 1;
        self.current = Some(Notice {
            seq: self.next_seq,
            kind,
            text: text.into(),
        });
        self.next_seq
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.show(NoticeKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.show(NoticeKind::Error, text)
    }

    /// Hide the notice `seq` if it is still the visible one.
    pub fn dismiss(&mut self, seq: u64) -> bool {
        match &self.current {
            Some(notice) if notice.seq == seq => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

/// Wait `after`, then hide notice `seq` unless a newer one replaced it.
pub async fn dismiss_after(notices: &impl ViewCell<Notices>, seq: u64, after: Duration) -> bool {
    sleep(after).await;
    notices.update(|n| n.dismiss(seq))
}

/// Consume the `Signal<Notices>` from context.
pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

/// Shows the current notice and hides it after `duration`.
#[component]
pub fn NoticeBanner(duration: Duration) -> Element {
    let notices = use_notices();

    use_effect(move || {
        let Some(seq) = notices.read().current().map(|n| n.seq) else {
            return;
        };
        spawn(async move {
            dismiss_after(&notices, seq, duration).await;
        });
    });

    let current = notices.read().current().cloned();

    rsx! {
        if let Some(notice) = current {
            div {
                id: "formMessage",
                class: notice.kind.class(),
                role: "status",
                "{notice.text}"
            }
        }
    }
}
