//! Durable key-value string storage.
//!
//! The history store persists a JSON array under a fixed key. Everything it
//! needs from the platform is captured by the [`StringStore`] trait so the
//! persistence mechanism stays swappable:
//!
//! - [`FileStore`] - one file per key with atomic temp-file + rename writes
//! - [`MemoryStore`] - in-memory map for embedding and tests
//!
//! A missing or unreadable value is reported as `None`, never as an error;
//! callers treat that as an empty data set.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Durable string storage keyed by name.
pub trait StringStore {
    /// Read the value stored under `key`; `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Durably replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: each key maps to `<dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for this application.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir().context("Failed to get platform data directory")?;
        Ok(Self::new(base.join("bili-suggest")))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StringStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory: {}", self.dir.display()))?;

        // Atomic write: temp file + rename
        let path = self.key_path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&temp, value)
            .with_context(|| format!("Failed to write temp file: {}", temp.display()))?;
        fs::rename(&temp, &path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
