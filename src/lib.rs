//! Feed engine for the chapter conference companion app.
//!
//! The mobile app shows a social/news feed sourced from the organization's
//! RSS feeds. This crate owns everything between the feed URL and the list
//! the UI renders:
//!
//! - [`feed::fetcher`] — HTTP retrieval of the raw feed payload
//! - [`feed::parser`] — single-pass streaming RSS parser
//! - [`feed::classifier`] — source-label classification for display badging
//! - [`posts`] — display-ready post assembly (label + formatted timestamp)
//! - [`service`] — the fetch/parse/classify cycle behind one feed view
//!
//! View rendering, navigation, login, calendar insertion, and notification
//! scheduling live in the app layer and are out of scope here.

pub mod config;
pub mod feed;
pub mod posts;
pub mod service;
