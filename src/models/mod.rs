//! Data models for the search box.
//!
//! This module defines the data structures shared across the crate:
//!
//! - [`HistoryEntry`] - A past query persisted in durable storage
//! - [`LegacyHistoryRecord`] - The pre-migration history representation
//! - [`SuggestItem`] - One row of the visible suggestion/history list
//!
//! These models use serde with field renames matching the storage format the
//! original search box wrote (`isHistory`).

pub mod history;
pub mod suggest;

pub use history::{HistoryEntry, LegacyHistoryRecord};
pub use suggest::SuggestItem;
