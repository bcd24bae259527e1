//! Tests for search history and its persistence.
//!
//! Tests cover: bounded most-recent-first ordering, deduplication, the JSON
//! file format, and how the controller records and replays entries.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use ratfind::editor::Buffer;
use ratfind::history::{
    HISTORY_LIMIT, HistoryDirection, HistoryStore, JsonSettingsStore, MemorySettingsStore,
    PersistenceError, SettingsStore,
};
use ratfind::search::{NotificationLog, SearchController, SearchCriteria};

fn store_in(dir: &Path) -> JsonSettingsStore {
    JsonSettingsStore::with_path(dir.join("find_history.json"))
}

/// A store whose disk is gone.
struct BrokenStore;

impl SettingsStore for BrokenStore {
    fn load(&self) -> Result<Vec<SearchCriteria>, PersistenceError> {
        Err(std::io::Error::other("disk gone").into())
    }

    fn save(&mut self, _records: &[SearchCriteria]) -> Result<(), PersistenceError> {
        Err(std::io::Error::other("disk gone").into())
    }
}

/// Test recording more than the limit keeps only the most recent.
#[test]
fn test_history_keeps_ten_most_recent() {
    let mut history = HistoryStore::new();
    for i in 0..11 {
        history.record(SearchCriteria::regex(format!("p{}", i)));
    }

    let patterns: Vec<&str> = history
        .records()
        .iter()
        .map(|r| r.pattern.as_str())
        .collect();
    assert_eq!(
        patterns,
        vec!["p10", "p9", "p8", "p7", "p6", "p5", "p4", "p3", "p2", "p1"]
    );
    assert_eq!(history.len(), HISTORY_LIMIT);
}

/// Test re-recording an existing entry moves it to the front.
#[test]
fn test_history_duplicate_moves_to_front() {
    let mut history = HistoryStore::new();
    for name in ["a", "b", "c", "d"] {
        history.record(SearchCriteria::regex(name));
    }
    // Most recent first: d c b a; "b" is third.
    history.record(SearchCriteria::regex("b"));

    let patterns: Vec<&str> = history
        .records()
        .iter()
        .map(|r| r.pattern.as_str())
        .collect();
    assert_eq!(patterns, vec!["b", "d", "c", "a"]);
}

/// Test records differing in any field are distinct entries.
#[test]
fn test_history_distinguishes_flags() {
    let mut history = HistoryStore::new();
    history.record(SearchCriteria::regex("x"));
    history.record(SearchCriteria::regex("x").with_case_sensitive(true));
    history.record(SearchCriteria::regex("x").with_replacement("y"));

    assert_eq!(history.len(), 3);
}

/// Test the JSON file uses the persisted field names.
#[test]
fn test_json_field_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = store_in(dir.path());

    store
        .save(&[SearchCriteria::literal("a.b").with_replacement("c")])
        .expect("save should succeed");

    let json = fs::read_to_string(store.path()).expect("read history");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(
        value,
        serde_json::json!([{
            "find_text": "a.b",
            "replace_text": "c",
            "use_regex": false,
            "case_sensitive": false,
            "selection_only": false,
        }])
    );
}

/// Test a hand-written history file loads.
#[test]
fn test_load_hand_written_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    fs::write(
        store.path(),
        r##"[{"find_text":"\\d+","replace_text":"#","use_regex":true,
             "case_sensitive":true,"selection_only":false}]"##,
    )
    .expect("write");

    let history = HistoryStore::load(&store).expect("load should succeed");
    assert_eq!(
        history.current(),
        Some(&SearchCriteria::regex(r"\d+").with_case_sensitive(true).with_replacement("#"))
    );
}

/// Test oversized or duplicated saved lists are cleaned up on load.
#[test]
fn test_load_normalizes_saved_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = store_in(dir.path());
    let mut records: Vec<_> = (0..14)
        .map(|i| SearchCriteria::literal(format!("p{}", i)))
        .collect();
    records.insert(2, SearchCriteria::literal("p0"));
    store.save(&records).expect("save should succeed");

    let history = HistoryStore::load(&store).expect("load should succeed");
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.records()[2].pattern, "p2");
}

/// Test the controller persists edited criteria and a new controller
/// resumes from them.
#[test]
fn test_controller_persists_across_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut buffer = Buffer::from_str("one two three");

    {
        let mut find = SearchController::new(store_in(dir.path()), NotificationLog::new());
        find.on_pattern_changed("two");
        find.set_case_sensitive(true);
        assert!(find.find_next(&mut buffer).expect("valid pattern"));
    }

    let find = SearchController::new(store_in(dir.path()), NotificationLog::new());
    assert_eq!(
        find.criteria(),
        &SearchCriteria::regex("two").with_case_sensitive(true)
    );
    assert!(!find.is_fresh_search(), "Restored criteria continue");
}

/// Test a corrupt history file falls back to defaults.
#[test]
fn test_corrupt_history_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    fs::write(store.path(), "[{ truncated").expect("write");

    let find = SearchController::new(store, NotificationLog::new());
    assert_eq!(find.criteria(), &SearchCriteria::default());
    assert!(find.history().is_empty());
}

/// Test persistence failures never reach the caller.
#[test]
fn test_broken_store_is_tolerated() {
    let mut buffer = Buffer::from_str("abc abc");
    let mut find = SearchController::new(BrokenStore, NotificationLog::new());
    find.on_pattern_changed("abc");

    assert!(find.find_next(&mut buffer).expect("valid pattern"));
    assert_eq!(buffer.selection(), (0, 3));
    assert_eq!(find.history().len(), 1, "Recorded in memory");
}

/// Test history navigation from the controller.
#[test]
fn test_controller_cycles_history() {
    let store = MemorySettingsStore::with_records(vec![
        SearchCriteria::regex("c"),
        SearchCriteria::regex("b"),
        SearchCriteria::regex("a"),
    ]);
    let mut find = SearchController::new(store, NotificationLog::new());
    assert_eq!(find.criteria().pattern, "c");
    assert!(find.can_go_older());
    assert!(!find.can_go_newer());

    assert!(find.cycle_history(HistoryDirection::Older));
    assert!(find.cycle_history(HistoryDirection::Older));
    assert_eq!(find.criteria().pattern, "a");
    assert!(!find.cycle_history(HistoryDirection::Older), "Clamped at oldest");
    assert!(!find.can_go_older());

    assert!(find.cycle_history(HistoryDirection::Newer));
    assert_eq!(find.criteria().pattern, "b");
}

/// Test running a replayed entry does not reorder history, but editing it does.
#[test]
fn test_replayed_entry_only_recorded_after_edit() {
    let store = MemorySettingsStore::with_records(vec![
        SearchCriteria::regex("new"),
        SearchCriteria::regex("old"),
    ]);
    let mut find = SearchController::new(store, NotificationLog::new());
    let mut buffer = Buffer::from_str("new old");

    find.cycle_history(HistoryDirection::Older);
    assert!(find.find_next(&mut buffer).expect("valid pattern"));
    assert_eq!(find.store().save_count(), 0);
    assert_eq!(find.history().records()[0].pattern, "new");

    find.on_pattern_changed("old");
    assert!(find.find_next(&mut buffer).expect("valid pattern"));
    assert_eq!(find.store().save_count(), 1);
    assert_eq!(find.history().records()[0].pattern, "old");
    assert_eq!(find.history().len(), 2, "Duplicate moved, not added");
    assert_eq!(find.history().cursor(), 0, "Recording resets the cursor");
}
