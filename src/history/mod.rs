//! Recent search history.
//!
//! A bounded, most-recent-first list of criteria with a navigation cursor.
//! The list never holds two equal records: recording an existing entry moves
//! it to the front.

pub mod storage;

pub use storage::{JsonSettingsStore, MemorySettingsStore, PersistenceError, SettingsStore};

use crate::search::SearchCriteria;

/// How many searches are remembered.
pub const HISTORY_LIMIT: usize = 10;

/// Direction to move through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Toward older entries (cursor increases).
    Older,
    /// Toward newer entries (cursor decreases).
    Newer,
}

impl HistoryDirection {
    /// Parses a control name into a direction.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "history_previous" | "older" => Some(Self::Older),
            "history_next" | "newer" => Some(Self::Newer),
            _ => None,
        }
    }
}

/// Most-recent-first list of past criteria.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    /// Records, index 0 is the most recent.
    records: Vec<SearchCriteria>,
    /// Navigation cursor, 0 = most recent.
    cursor: usize,
}

impl HistoryStore {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from a saved list, dropping duplicates (the first
    /// occurrence wins) and anything past [`HISTORY_LIMIT`].
    #[must_use]
    pub fn from_records(records: Vec<SearchCriteria>) -> Self {
        let mut deduped: Vec<SearchCriteria> = Vec::with_capacity(HISTORY_LIMIT);
        for record in records {
            if deduped.len() == HISTORY_LIMIT {
                break;
            }
            if !deduped.contains(&record) {
                deduped.push(record);
            }
        }
        Self {
            records: deduped,
            cursor: 0,
        }
    }

    /// Loads history from `store`.
    ///
    /// # Errors
    /// Returns the store's [`PersistenceError`] unchanged; callers decide the
    /// fallback.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Result<Self, PersistenceError> {
        store.load().map(Self::from_records)
    }

    /// Saves the current list to `store`.
    ///
    /// # Errors
    /// Returns the store's [`PersistenceError`].
    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistenceError> {
        store.save(&self.records)
    }

    /// Returns the records, most recent first.
    #[must_use]
    pub fn records(&self) -> &[SearchCriteria] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there is no history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the record under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&SearchCriteria> {
        self.records.get(self.cursor)
    }

    /// Records `criteria` as the most recent entry and resets the cursor.
    pub fn record(&mut self, criteria: SearchCriteria) {
        self.records.retain(|existing| existing != &criteria);
        self.records.insert(0, criteria);
        self.records.truncate(HISTORY_LIMIT);
        self.cursor = 0;
    }

    /// Moves the cursor one step, clamped to the list.
    ///
    /// Returns the record at the new position, or `None` at a boundary.
    pub fn step(&mut self, direction: HistoryDirection) -> Option<&SearchCriteria> {
        let last = self.records.len().checked_sub(1)?;
        let next = match direction {
            HistoryDirection::Older => (self.cursor + 1).min(last),
            HistoryDirection::Newer => self.cursor.saturating_sub(1),
        };
        if next == self.cursor {
            return None;
        }
        self.cursor = next;
        self.records.get(next)
    }

    /// Returns true if an older entry exists past the cursor.
    #[must_use]
    pub fn can_go_older(&self) -> bool {
        self.cursor + 1 < self.records.len()
    }

    /// Returns true if a newer entry exists before the cursor.
    #[must_use]
    pub const fn can_go_newer(&self) -> bool {
        self.cursor > 0
    }
}
