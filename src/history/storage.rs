//! Persisted search history.
//!
//! Stores the history list at `~/.ratfind/find_history.json` by default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::search::SearchCriteria;

/// Errors that can occur while loading or saving history.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whole-value load/save of the history list, most-recent-first.
pub trait SettingsStore {
    /// Loads the saved list.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if saved data exists but cannot be read.
    fn load(&self) -> Result<Vec<SearchCriteria>, PersistenceError>;

    /// Replaces the saved list.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if the list cannot be written.
    fn save(&mut self, records: &[SearchCriteria]) -> Result<(), PersistenceError>;
}

/// History stored as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    /// Path to the storage file.
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Creates a store at the default path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Creates a store at a custom path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        assert!(!path.as_os_str().is_empty(), "path must not be empty");
        Self { path }
    }

    /// Returns the default storage path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ratfind")
            .join("find_history.json")
    }

    /// Returns the storage path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Vec<SearchCriteria>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn save(&mut self, records: &[SearchCriteria]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for hosts without a settings file.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    records: Vec<SearchCriteria>,
    saves: usize,
}

impl MemorySettingsStore {
    /// Creates a store preloaded with `records`.
    #[must_use]
    pub fn with_records(records: Vec<SearchCriteria>) -> Self {
        Self { records, saves: 0 }
    }

    /// Returns the last saved list.
    #[must_use]
    pub fn records(&self) -> &[SearchCriteria] {
        &self.records
    }

    /// Returns how many times the list was saved.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Vec<SearchCriteria>, PersistenceError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[SearchCriteria]) -> Result<(), PersistenceError> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}
