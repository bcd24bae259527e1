//! Property tests for search and replace.

use proptest::prelude::*;
use ratfind::editor::Buffer;
use ratfind::history::{HISTORY_LIMIT, HistoryStore, MemorySettingsStore};
use ratfind::search::{NotificationLog, SearchController, SearchCriteria};

type Controller = SearchController<MemorySettingsStore, NotificationLog>;

fn literal_controller(pattern: &str, replacement: &str) -> Controller {
    let mut find = SearchController::new(MemorySettingsStore::default(), NotificationLog::new());
    find.on_pattern_changed(pattern);
    find.on_replacement_changed(replacement);
    find.set_use_regex(false);
    find.set_case_sensitive(true);
    find
}

/// Char offsets of every `needle` in `text`.
fn char_positions(text: &str, needle: char) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| *c == needle)
        .map(|(i, _)| i)
        .collect()
}

/// Words over a small alphabet joined by `x`, so every `x` is followed by
/// at least one other character.
fn joined_words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-cé]{1,5}", 1..8).prop_map(|words| words.join("x"))
}

proptest! {
    #[test]
    fn prop_fresh_find_selects_first_occurrence(
        text in "[a-dé ]{0,40}",
        needle in "[a-d]{1,3}",
    ) {
        let mut buffer = Buffer::from_str(&text);
        let mut find = literal_controller(&needle, "");

        let found = find.find_next(&mut buffer).expect("literal always compiles");
        match text.find(&needle) {
            Some(byte) => {
                let start = text[..byte].chars().count();
                prop_assert!(found);
                prop_assert_eq!(buffer.selection(), (start, start + needle.chars().count()));
            }
            None => {
                prop_assert!(!found);
                prop_assert_eq!(buffer.selection(), (0, 0));
            }
        }
    }

    #[test]
    fn prop_find_next_visits_every_occurrence_in_order(text in joined_words()) {
        let mut buffer = Buffer::from_str(&text);
        let mut find = literal_controller("x", "");

        let mut visited = Vec::new();
        while find.find_next(&mut buffer).expect("literal always compiles") {
            visited.push(buffer.selection().0);
            prop_assert!(visited.len() <= text.len(), "search must terminate");
        }

        prop_assert_eq!(visited, char_positions(&text, 'x'));
    }

    #[test]
    fn prop_find_previous_from_end_visits_in_reverse(text in joined_words()) {
        let mut buffer = Buffer::from_str(&text);
        buffer.set_cursor(buffer.len_chars());
        let mut find = literal_controller("x", "");

        let mut visited = Vec::new();
        while find.find_previous(&mut buffer).expect("literal always compiles") {
            visited.push(buffer.selection().0);
            prop_assert!(visited.len() <= text.len(), "search must terminate");
        }

        let mut expected = char_positions(&text, 'x');
        expected.reverse();
        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn prop_replace_all_matches_str_replace(
        text in "[a-cé]{0,30}",
        cursor in 0usize..40,
        replacement in "[x-zé]{0,3}",
    ) {
        let mut buffer = Buffer::from_str(&text);
        buffer.set_cursor(cursor);
        let split = buffer.selection().0;
        let mut find = literal_controller("a", &replacement);

        let count = find.replace_all(&mut buffer).expect("literal always compiles");

        let head: String = text.chars().take(split).collect();
        let tail: String = text.chars().skip(split).collect();
        let new_head = head.replace('a', &replacement);
        prop_assert_eq!(count, text.matches('a').count());
        prop_assert_eq!(buffer.text(), format!("{}{}", new_head, tail.replace('a', &replacement)));
        let boundary = new_head.chars().count();
        prop_assert_eq!(buffer.selection(), (boundary, boundary));
        if count == 0 {
            prop_assert!(!buffer.is_modified());
        }
    }

    #[test]
    fn prop_history_is_bounded_and_unique(patterns in prop::collection::vec("[a-e]{1,2}", 0..40)) {
        let mut history = HistoryStore::new();
        for pattern in &patterns {
            history.record(SearchCriteria::regex(pattern.as_str()));
        }

        prop_assert!(history.len() <= HISTORY_LIMIT);
        for (i, record) in history.records().iter().enumerate() {
            prop_assert!(!history.records()[i + 1..].contains(record));
        }
        if let Some(last) = patterns.last() {
            prop_assert_eq!(&history.records()[0].pattern, last);
        }
    }
}
