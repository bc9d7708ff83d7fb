//! # API crate: HTTP access to the poll backend
//!
//! The poll board talks to a plain JSON backend. This crate provides the
//! production implementation of [`store::RemoteStore`] on top of `reqwest`,
//! which uses `fetch` when compiled for the browser and hyper natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`http`] | [`HttpStore`]: request building, status checks, envelope decoding and error conversion |
//!
//! ## Routes consumed
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list_polls` | `GET /polls` |
//! | `create_poll` | `POST /polls/create` |
//! | `delete_poll` | `DELETE /polls/{id}` |
//! | `update_option` | `PUT /options/{id}` |
//! | `list_users` | `GET /users` |
//! | `create_user` | `POST /users/create` |
//! | `delete_user` | `DELETE /users/{id}` |
//!
//! Paths come from [`store::Endpoint`] so they stay in sync with the in-memory
//! store used by tests.

pub mod http;

pub use http::HttpStore;
pub use store::{Ack, RemoteStore, StoreError};
