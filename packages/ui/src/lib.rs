//! This crate contains all shared UI for the workspace.
//!
//! Controllers (`refresh_*`, `delete_*`, `submit_*`, `toggle_option`) are plain
//! async functions over a [`store::RemoteStore`] and [`ViewCell`]s. Components
//! render the view state and hand user actions back to the app as events.

use dioxus::prelude::*;

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod cell;
pub use cell::ViewCell;

mod client;
pub use client::{make_store, resolve_base_url, DEFAULT_BASE_URL};

mod form;
pub use form::FormError;

mod navbar;
pub use navbar::Navbar;

pub mod notifier;
pub use notifier::{dismiss_after, use_notices, NoticeBanner, NoticeKind, Notices};

mod timer;

pub mod view;
pub use view::{Block, ListView};

pub mod option_toggle;
pub use option_toggle::{toggle_option, OptionButton, OptionToggle};

pub mod poll_list;
pub use poll_list::{delete_poll, refresh_polls, PollBlock, PollList, PollsView};

pub mod poll_form;
pub use poll_form::{add_option, submit_poll, PollDraft, PollForm};

pub mod user_list;
pub use user_list::{delete_user, refresh_users, UserBlock, UserList, UsersView};

pub mod user_form;
pub use user_form::{submit_user, UserDraft, UserForm};
