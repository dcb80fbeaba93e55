//! Durable search history.
//!
//! [`HistoryStore`] keeps a capped, deduplicated, recency-ordered list of past
//! queries as a JSON array under a fixed storage key. All mutations follow the
//! same rule: dedupe by value (larger timestamp wins), sort by descending
//! timestamp, truncate to [`MAX_HISTORY_ITEMS`], persist.
//!
//! A one-time migration converts records from the legacy settings
//! representation (keyword + date string) into the current format; the legacy
//! source is emptied only after the merged result has been persisted, so a
//! partial failure leaves both stores untouched.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::models::{HistoryEntry, LegacyHistoryRecord};
use crate::storage::StringStore;

/// Storage key the history array persists under.
pub const SEARCH_HISTORY_KEY: &str = "be_search_history";

/// Maximum number of history entries kept.
pub const MAX_HISTORY_ITEMS: usize = 10;

/// The legacy history source: an external settings object exposing a mutable
/// list of keyword/date records. The store reads it once and empties it after
/// a successful migration.
pub trait LegacyHistoryProvider {
    fn read(&self) -> Vec<LegacyHistoryRecord>;
    fn clear(&mut self) -> Result<()>;
}

/// Capped, deduplicated, recency-ordered query history over durable storage.
pub struct HistoryStore<S: StringStore> {
    store: S,
}

impl<S: StringStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current history, newest first, at most [`MAX_HISTORY_ITEMS`] entries.
    /// Absent or unparseable storage reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        normalize(self.raw_entries())
    }

    /// Record a submitted query. Refreshes the timestamp if the value already
    /// exists, otherwise appends a new entry; then dedupes, sorts, caps, and
    /// persists.
    pub fn add(&mut self, value: &str, now: i64) -> Result<()> {
        let mut entries = self.raw_entries();
        if let Some(existing) = entries.iter_mut().find(|e| e.value == value) {
            existing.timestamp = now;
        } else {
            entries.push(HistoryEntry::new(value, now));
        }
        self.persist(normalize(entries))
    }

    /// Delete the first entry matching `value`. A missing value is a no-op,
    /// not an error.
    pub fn remove(&mut self, value: &str) -> Result<()> {
        let mut entries = self.raw_entries();
        if let Some(index) = entries.iter().position(|e| e.value == value) {
            entries.remove(index);
            self.persist(entries)?;
        }
        Ok(())
    }

    /// Persist an empty history.
    pub fn clear(&mut self) -> Result<()> {
        self.persist(Vec::new())
    }

    /// One-time migration from the legacy representation. Converts each
    /// legacy record, merges with current entries under the usual
    /// dedupe/sort/cap rule, persists, then empties the legacy source.
    ///
    /// Failures are logged and leave both stores in their prior state; the
    /// caller never sees an error.
    pub fn migrate_legacy(&mut self, provider: &mut dyn LegacyHistoryProvider) {
        if let Err(e) = self.try_migrate(provider) {
            warn!("search history migration failed: {e:#}");
        }
    }

    fn try_migrate(&mut self, provider: &mut dyn LegacyHistoryProvider) -> Result<()> {
        let legacy = provider.read();
        if legacy.is_empty() {
            return Ok(());
        }

        // Convert everything before touching storage: a single bad record
        // abandons the whole run with state unchanged.
        let mut merged: Vec<HistoryEntry> = legacy
            .iter()
            .map(|record| {
                let timestamp = parse_legacy_date(&record.date)?;
                Ok(HistoryEntry::new(record.keyword.as_str(), timestamp))
            })
            .collect::<Result<_>>()?;

        merged.extend(self.raw_entries());
        self.persist(normalize(merged))?;
        provider.clear().context("Failed to clear legacy history source")?;
        Ok(())
    }

    fn raw_entries(&self) -> Vec<HistoryEntry> {
        self.store
            .read(SEARCH_HISTORY_KEY)
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn persist(&mut self, entries: Vec<HistoryEntry>) -> Result<()> {
        let json = serde_json::to_string(&entries).context("Failed to serialize history")?;
        self.store.write(SEARCH_HISTORY_KEY, &json)
    }
}

/// Dedupe by value (larger timestamp wins), sort newest first, cap the length.
fn normalize(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    // Stable sort keeps insertion order for equal timestamps, so the first
    // occurrence of each value after sorting is the one to keep.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let mut seen = Vec::new();
    entries.retain(|e| {
        if seen.iter().any(|v| v == &e.value) {
            false
        } else {
            seen.push(e.value.clone());
            true
        }
    });
    entries.truncate(MAX_HISTORY_ITEMS);
    entries
}

/// Parse a legacy date string into epoch milliseconds.
fn parse_legacy_date(date: &str) -> Result<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().timestamp_millis());
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        && let Some(dt) = d.and_hms_opt(0, 0, 0)
    {
        return Ok(dt.and_utc().timestamp_millis());
    }
    bail!("Unrecognized legacy history date: {date}")
}
