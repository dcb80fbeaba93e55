//! bili-suggest - incremental search suggestions for the bilibili search box
//!
//! This library implements the suggestion/history pipeline behind a site
//! search box:
//!
//! - Durable, capped, recency-ordered search history with one-time migration
//!   from a legacy settings representation
//! - `av`/`BV` identifier recognition with direct jump links and a
//!   cross-reference lookup for the other id form
//! - Debounced, composition-aware suggestion fetching where only the most
//!   recently issued request may update the visible results
//! - A keyboard-navigable result list (focus movement, deletion, submission,
//!   clearing) defined independently of any rendering technology
//!
//! The host UI drives a [`SearchBox`](engine::SearchBox) with explicit input
//! events, registers a render callback for state changes, and performs the
//! returned [`Effect`](engine::Effect)s (navigation, form submission).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//!
//! use bili_suggest::clipboard::NoopClipboard;
//! use bili_suggest::engine::{InputEvent, SearchBox};
//! use bili_suggest::remote::{ClientConfig, SuggestClient};
//! use bili_suggest::storage::FileStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = SuggestClient::new(ClientConfig::default())?;
//! let mut search_box = SearchBox::new(client, FileStore::default_location()?, Box::new(NoopClipboard));
//! search_box.handle_event(InputEvent::TextChanged("rust".to_string()), Instant::now());
//! search_box.tick(Instant::now()).await;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod clipboard;
pub mod engine;
pub mod history;
pub mod idjump;
pub mod input;
pub mod models;
pub mod navlist;
pub mod remote;
pub mod storage;
pub mod suggest;

// Re-export commonly used types
pub use engine::{Effect, InputEvent, SearchBox};
pub use history::{HistoryStore, LegacyHistoryProvider, MAX_HISTORY_ITEMS};
pub use idjump::{InputKind, classify};
pub use models::{HistoryEntry, LegacyHistoryRecord, SuggestItem};
pub use suggest::{SearchBoxState, StateHandle};
