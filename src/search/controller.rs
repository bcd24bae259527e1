//! The find/replace state machine.
//!
//! One [`SearchController`] lives for one dialog interaction. It owns the
//! current criteria, the history list and its cursor, and drives the host
//! buffer through the [`TextHost`] contract: every operation reads the text
//! and selection, computes a result, and issues at most a selection change
//! and a replacement back to the host.

use tracing::{debug, info, warn};

use super::action::{FindAction, Outcome};
use super::criteria::{CriteriaField, FieldError, FieldValue, SearchCriteria};
use super::notify::{Notification, Notifier};
use super::pattern::{CompiledPattern, PatternError, byte_offset, char_slice, compile_criteria};
use crate::config::Config;
use crate::editor::TextHost;
use crate::history::{HistoryDirection, HistoryStore, JsonSettingsStore, SettingsStore};

/// Mutable per-controller search state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Current criteria, possibly not yet recorded.
    pub criteria: SearchCriteria,
    /// True when criteria changed since the last completed find. The next
    /// find then starts at the selection edge instead of continuing past it.
    pub is_fresh_search: bool,
    /// Zero-point used for the last match's relative offsets.
    pub last_match_start_offset: usize,
}

impl SearchSession {
    /// Creates a continuing session with `criteria`.
    ///
    /// Restored criteria are not an edit, so the first find moves past the
    /// current selection until the user changes a field.
    #[must_use]
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            is_fresh_search: false,
            last_match_start_offset: 0,
        }
    }
}

/// Find/replace controller.
pub struct SearchController<S, N> {
    /// Current session state.
    session: SearchSession,
    /// Recent criteria.
    history: HistoryStore,
    /// Where history is persisted.
    store: S,
    /// Where notifications go.
    notifier: N,
    /// Criteria were edited by the user since they were last recorded.
    needs_record: bool,
}

impl<S: SettingsStore, N: Notifier> SearchController<S, N> {
    /// Creates a controller, restoring history from `store`.
    ///
    /// Starts from the most recent history entry, or the built-in defaults
    /// when there is none.
    pub fn new(store: S, notifier: N) -> Self {
        Self::with_defaults(store, notifier, SearchCriteria::default())
    }

    /// Creates a controller that falls back to `defaults` when history is
    /// empty or unreadable.
    pub fn with_defaults(store: S, notifier: N, defaults: SearchCriteria) -> Self {
        let history = HistoryStore::load(&store).unwrap_or_else(|err| {
            warn!(%err, "could not load search history, starting empty");
            HistoryStore::new()
        });
        let criteria = history.current().cloned().unwrap_or(defaults);
        debug!(entries = history.len(), "search controller ready");

        Self {
            session: SearchSession::new(criteria),
            history,
            store,
            notifier,
            needs_record: false,
        }
    }

    /// Returns the session state.
    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Returns the current criteria.
    #[must_use]
    pub fn criteria(&self) -> &SearchCriteria {
        &self.session.criteria
    }

    /// Returns true if the next find starts at the selection edge.
    #[must_use]
    pub fn is_fresh_search(&self) -> bool {
        self.session.is_fresh_search
    }

    /// Returns the history.
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Returns the settings store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the notifier mutably.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Sets one criteria field by name. Always invalidates the running search.
    ///
    /// # Errors
    /// Returns [`FieldError`] if `value` is the wrong kind for `field`; the
    /// session is left untouched.
    pub fn set_field(&mut self, field: CriteriaField, value: FieldValue) -> Result<(), FieldError> {
        self.session.criteria.apply(field, value)?;
        self.mark_edited();
        Ok(())
    }

    /// Toggles regex interpretation.
    pub fn set_use_regex(&mut self, value: bool) {
        self.session.criteria.is_regex = value;
        self.mark_edited();
    }

    /// Toggles case sensitivity.
    pub fn set_case_sensitive(&mut self, value: bool) {
        self.session.criteria.case_sensitive = value;
        self.mark_edited();
    }

    /// Toggles selection-only scope.
    pub fn set_selection_only(&mut self, value: bool) {
        self.session.criteria.selection_only = value;
        self.mark_edited();
    }

    /// The find input changed.
    pub fn on_pattern_changed(&mut self, text: impl Into<String>) {
        self.session.criteria.pattern = text.into();
        self.mark_edited();
    }

    /// The replace input changed.
    pub fn on_replacement_changed(&mut self, text: impl Into<String>) {
        self.session.criteria.replacement = text.into();
        self.mark_edited();
    }

    fn mark_edited(&mut self) {
        self.session.is_fresh_search = true;
        self.needs_record = true;
    }

    /// Loads the neighbouring history entry into the current criteria.
    ///
    /// Replaying a saved search is not an edit: the fresh-search flag is left
    /// alone. Returns false at either end of the list.
    pub fn cycle_history(&mut self, direction: HistoryDirection) -> bool {
        let Some(criteria) = self.history.step(direction) else {
            return false;
        };
        self.session.criteria = criteria.clone();
        self.needs_record = false;
        debug!(cursor = self.history.cursor(), ?direction, "loaded history entry");
        true
    }

    /// Returns true if an older history entry is available.
    #[must_use]
    pub fn can_go_older(&self) -> bool {
        self.history.can_go_older()
    }

    /// Returns true if a newer history entry is available.
    #[must_use]
    pub fn can_go_newer(&self) -> bool {
        self.history.can_go_newer()
    }

    fn record_if_edited(&mut self) {
        if !self.needs_record {
            return;
        }
        self.needs_record = false;
        self.history.record(self.session.criteria.clone());
        match self.history.save(&mut self.store) {
            Ok(()) => info!(entries = self.history.len(), "search history saved"),
            Err(err) => warn!(%err, "could not save search history"),
        }
    }

    /// Compiles the current criteria.
    ///
    /// # Errors
    /// Returns [`PatternError`] for malformed regex syntax.
    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        compile_criteria(&self.session.criteria)
    }

    /// Runs `action` against `host`.
    ///
    /// # Errors
    /// Returns [`PatternError`] before touching the host if the criteria do
    /// not compile.
    pub fn perform<H: TextHost + ?Sized>(
        &mut self,
        action: FindAction,
        host: &mut H,
    ) -> Result<Outcome, PatternError> {
        debug!(action = action.as_str(), "performing search action");
        match action {
            FindAction::FindNext => self.find_next(host).map(Outcome::from_found),
            FindAction::FindPrevious => self.find_previous(host).map(Outcome::from_found),
            FindAction::ReplaceAndFind => self.replace_and_find(host).map(Outcome::from_found),
            FindAction::ReplaceAll => self.replace_all(host).map(Outcome::Replaced),
        }
    }

    /// Selects the next match.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the criteria do not compile.
    pub fn find_next<H: TextHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, PatternError> {
        let compiled = self.compile()?;
        let found = self.find_next_with(&compiled, host);
        self.record_if_edited();
        Ok(found)
    }

    /// Selects the previous match.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the criteria do not compile.
    pub fn find_previous<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<bool, PatternError> {
        let compiled = self.compile()?;
        let found = self.find_previous_with(&compiled, host);
        self.record_if_edited();
        Ok(found)
    }

    /// Replaces every match in scope and returns the count.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the criteria do not compile.
    pub fn replace_all<H: TextHost + ?Sized>(&mut self, host: &mut H) -> Result<usize, PatternError> {
        let compiled = self.compile()?;
        let count = self.replace_all_with(&compiled, host);
        self.record_if_edited();
        Ok(count)
    }

    /// Replaces the selected match (or the next one), then selects the match
    /// after it. Returns whether that following match was found.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the criteria do not compile.
    pub fn replace_and_find<H: TextHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<bool, PatternError> {
        let compiled = self.compile()?;
        let found = self.replace_and_find_with(&compiled, host);
        self.record_if_edited();
        Ok(found)
    }

    fn find_next_with<H: TextHost + ?Sized>(&mut self, compiled: &CompiledPattern, host: &mut H) -> bool {
        let text = host.text();
        let len = host.len_chars();
        let (sel_start, sel_end) = host.selection();

        let (anchor, end) = if self.session.criteria.selection_only && sel_start != sel_end {
            (sel_start, sel_end)
        } else if self.session.is_fresh_search {
            (sel_start, len)
        } else {
            ((sel_end + 1).min(len), len)
        };
        self.session.last_match_start_offset = anchor;

        match compiled.first_match(char_slice(&text, anchor, end)) {
            Some(span) => {
                let found = span.offset(anchor);
                debug!(anchor, start = found.start, end = found.end, "find next matched");
                host.set_selection(found.start, found.end);
                self.session.is_fresh_search = false;
                true
            }
            None => {
                debug!(anchor, end, "find next exhausted");
                self.notifier.notify(Notification::NotFound);
                false
            }
        }
    }

    fn find_previous_with<H: TextHost + ?Sized>(
        &mut self,
        compiled: &CompiledPattern,
        host: &mut H,
    ) -> bool {
        let text = host.text();
        let (sel_start, sel_end) = host.selection();

        let (anchor, upper) = if self.session.criteria.selection_only && sel_start != sel_end {
            (sel_start, sel_end)
        } else if self.session.is_fresh_search {
            (0, sel_end)
        } else {
            (0, sel_start)
        };
        self.session.last_match_start_offset = anchor;

        match compiled.last_match(char_slice(&text, anchor, upper)) {
            Some(span) => {
                let found = span.offset(anchor);
                debug!(anchor, start = found.start, end = found.end, "find previous matched");
                host.set_selection(found.start, found.end);
                self.session.is_fresh_search = false;
                true
            }
            None => {
                debug!(anchor, upper, "find previous exhausted");
                self.notifier.notify(Notification::NotFound);
                false
            }
        }
    }

    fn replace_all_with<H: TextHost + ?Sized>(&mut self, compiled: &CompiledPattern, host: &mut H) -> usize {
        let text = host.text();
        let (sel_start, sel_end) = host.selection();
        let replacement = self.session.criteria.replacement.as_str();

        let count = if self.session.criteria.selection_only && sel_start != sel_end {
            let (new_text, count) = compiled.substitute(char_slice(&text, sel_start, sel_end), replacement);
            if count > 0 {
                host.replace_text(sel_start, sel_end, &new_text);
            }
            count
        } else {
            // Head and tail are substituted independently; the selection start
            // maps to the end of the substituted head.
            let (head, tail) = text.split_at(byte_offset(&text, sel_start));
            let (mut new_text, head_count) = compiled.substitute(head, replacement);
            let (new_tail, tail_count) = compiled.substitute(tail, replacement);
            let count = head_count + tail_count;
            let boundary = new_text.chars().count();
            if count > 0 {
                let len = host.len_chars();
                new_text.push_str(&new_tail);
                host.replace_text(0, len, &new_text);
            }
            host.set_selection(boundary, boundary);
            count
        };

        info!(count, "replace all finished");
        self.notifier.notify(Notification::Replaced(count));
        count
    }

    fn replace_and_find_with<H: TextHost + ?Sized>(
        &mut self,
        compiled: &CompiledPattern,
        host: &mut H,
    ) -> bool {
        // Exact text equality against the raw find string, not a pattern match.
        let (start, end) = if host.selected_text() == self.session.criteria.pattern {
            host.selection()
        } else {
            if !self.find_next_with(compiled, host) {
                return false;
            }
            host.selection()
        };

        let replacement = self.session.criteria.replacement.clone();
        host.replace_text(start, end, &replacement);
        host.set_selection(start, start + replacement.chars().count());

        // Continue past the replaced text rather than re-finding it.
        self.session.is_fresh_search = false;
        self.find_next_with(compiled, host)
    }
}

impl<N: Notifier> SearchController<JsonSettingsStore, N> {
    /// Creates a controller backed by the configured history file and
    /// default criteria.
    pub fn from_config(config: &Config, notifier: N) -> Self {
        Self::with_defaults(
            config.history_store(),
            notifier,
            config.default_criteria.clone(),
        )
    }
}
