//! Text buffer implementation using ropey.
//!
//! Provides character-indexed text storage with a single selection.
//! Implements [`TextHost`] so it can stand in for a real editor behind the
//! search controller. Undo history belongs to the embedding editor.

use ropey::Rope;
use thiserror::Error;

use super::host::TextHost;

/// Buffer error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Range is reversed or extends past the end of the buffer.
    #[error("Invalid range {start}..{end} for buffer of {len} chars")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Text buffer with a selection.
#[derive(Debug, Clone)]
pub struct Buffer {
    /// The rope holding the text.
    rope: Rope,
    /// Selection as (start, end) character offsets, start <= end.
    selection: (usize, usize),
    /// Modified flag.
    modified: bool,
}

impl Buffer {
    /// Creates a new empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Creates a buffer from a string with the selection at the start.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: (0, 0),
            modified: false,
        }
    }

    /// Returns the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns true if the buffer has been modified.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Marks the buffer as saved.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Returns the full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Gets text in a character range.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(start..end).to_string())
    }

    /// Returns the selection range.
    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Returns true if the selection spans at least one character.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.selection.0 != self.selection.1
    }

    /// Sets the selection, ordering and clamping the offsets to the buffer.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = (start.min(len), end.min(len));
    }

    /// Collapses the selection to an insertion point.
    pub fn set_cursor(&mut self, idx: usize) {
        self.select(idx, idx);
    }

    /// Returns the selected text.
    #[must_use]
    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection;
        self.rope.slice(start..end).to_string()
    }

    /// Replaces the range `[start, end)` with `text`.
    ///
    /// Afterwards the selection covers the inserted text.
    ///
    /// # Errors
    /// Returns [`BufferError::InvalidRange`] if the range is reversed or
    /// extends past the end of the buffer.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> Result<(), BufferError> {
        let len = self.rope.len_chars();
        if start > end || end > len {
            return Err(BufferError::InvalidRange { start, end, len });
        }

        if start < end {
            self.rope.remove(start..end);
            self.modified = true;
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
            self.modified = true;
        }
        self.selection = (start, start + text.chars().count());
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHost for Buffer {
    fn text(&self) -> String {
        Buffer::text(self)
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.select(start, end);
    }

    fn replace_text(&mut self, start: usize, end: usize, text: &str) {
        if let Err(err) = self.replace_range(start, end, text) {
            tracing::warn!(%err, "rejected host replacement");
        }
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn selected_text(&self) -> String {
        Buffer::selected_text(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.selection(), (0, 0));
    }

    #[test]
    fn test_select_orders_and_clamps() {
        let mut buffer = Buffer::from_str("Hello");
        buffer.select(4, 1);
        assert_eq!(buffer.selection(), (1, 4));
        buffer.select(2, 99);
        assert_eq!(buffer.selection(), (2, 5));
    }

    #[test]
    fn test_replace_selects_inserted_text() {
        let mut buffer = Buffer::from_str("cat dog");
        buffer.replace_range(0, 3, "bird").expect("valid range");
        assert_eq!(buffer.text(), "bird dog");
        assert_eq!(buffer.selection(), (0, 4));
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_replace_rejects_out_of_range() {
        let mut buffer = Buffer::from_str("abc");
        let err = buffer.replace_range(2, 9, "x").unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidRange {
                start: 2,
                end: 9,
                len: 3
            }
        );
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_empty_replacement_of_empty_range_is_unmodified() {
        let mut buffer = Buffer::from_str("abc");
        buffer.replace_range(1, 1, "").expect("valid range");
        assert!(!buffer.is_modified());
        assert_eq!(buffer.selection(), (1, 1));
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut buffer = Buffer::from_str("héllo wörld");
        buffer.select(6, 11);
        assert_eq!(buffer.selected_text(), "wörld");
        buffer.replace_range(6, 11, "there").expect("valid range");
        assert_eq!(buffer.text(), "héllo there");
    }
}
