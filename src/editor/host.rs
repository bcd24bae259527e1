//! The text-buffer host contract.

/// An editor surface the search engine can read from and mutate.
///
/// All offsets are 0-based character indices into the full buffer text.
/// A selection with `start == end` is an insertion point.
pub trait TextHost {
    /// Returns the full buffer text.
    fn text(&self) -> String;

    /// Returns the current selection as `(start, end)` with `start <= end`.
    fn selection(&self) -> (usize, usize);

    /// Moves the selection.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Replaces the half-open range `[start, end)` with `text`.
    fn replace_text(&mut self, start: usize, end: usize, text: &str);

    /// Returns the length of the buffer in characters.
    fn len_chars(&self) -> usize {
        self.text().chars().count()
    }

    /// Returns the currently selected text.
    fn selected_text(&self) -> String {
        let (start, end) = self.selection();
        self.text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }
}
