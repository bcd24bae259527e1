//! Pattern compilation and match primitives.
//!
//! The regex engine reports byte offsets; everything leaving this module is
//! a character offset relative to the searched space.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::criteria::SearchCriteria;

/// The pattern did not compile.
#[derive(Debug, Error)]
#[error("Invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// The pattern as handed to the regex engine.
    pub pattern: String,
    /// Engine error.
    pub source: regex::Error,
}

/// Engine flags derived from criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFlags {
    /// `^`/`$` anchor at line boundaries. Always set.
    pub multi_line: bool,
    /// Case-insensitive matching.
    pub case_insensitive: bool,
}

/// A match span in characters, relative to the searched space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Shifts the span by `anchor` characters.
    #[must_use]
    pub const fn offset(self, anchor: usize) -> Self {
        Self {
            start: anchor + self.start,
            end: anchor + self.end,
        }
    }
}

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    flags: MatchFlags,
    literal: bool,
}

/// Compiles criteria into a regex.
///
/// Literal criteria are escaped first, so they behave as substring search.
///
/// # Errors
/// Returns [`PatternError`] if the (possibly escaped) pattern is not a valid
/// regular expression. Only regex criteria can fail.
pub fn compile_criteria(criteria: &SearchCriteria) -> Result<CompiledPattern, PatternError> {
    let source = if criteria.is_regex {
        criteria.pattern.clone()
    } else {
        regex::escape(&criteria.pattern)
    };
    let flags = MatchFlags {
        multi_line: true,
        case_insensitive: !criteria.case_sensitive,
    };

    let regex = RegexBuilder::new(&source)
        .multi_line(flags.multi_line)
        .case_insensitive(flags.case_insensitive)
        .build()
        .map_err(|source_err| PatternError {
            pattern: source.clone(),
            source: source_err,
        })?;

    Ok(CompiledPattern {
        regex,
        flags,
        literal: !criteria.is_regex,
    })
}

impl CompiledPattern {
    /// Returns the compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the engine flags.
    #[must_use]
    pub const fn flags(&self) -> MatchFlags {
        self.flags
    }

    /// Returns true if compiled from literal criteria.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.literal
    }

    /// Returns the first match in `space`.
    #[must_use]
    pub fn first_match(&self, space: &str) -> Option<Span> {
        self.regex.find(space).map(|m| to_span(space, m))
    }

    /// Returns the last of the non-overlapping forward matches in `space`.
    #[must_use]
    pub fn last_match(&self, space: &str) -> Option<Span> {
        self.regex.find_iter(space).last().map(|m| to_span(space, m))
    }

    /// Returns every non-overlapping match in `space`.
    #[must_use]
    pub fn matches(&self, space: &str) -> Vec<Span> {
        self.regex.find_iter(space).map(|m| to_span(space, m)).collect()
    }

    /// Substitutes every non-overlapping match, returning the new text and
    /// the number of replacements.
    ///
    /// Regex criteria expand `$1` / `${name}` group references in
    /// `replacement`; literal criteria insert it verbatim.
    #[must_use]
    pub fn substitute(&self, space: &str, replacement: &str) -> (String, usize) {
        let mut out = String::with_capacity(space.len());
        let mut last = 0;
        let mut count = 0;

        for caps in self.regex.captures_iter(space) {
            let Some(m) = caps.get(0) else {
                continue;
            };
            out.push_str(&space[last..m.start()]);
            if self.literal {
                out.push_str(replacement);
            } else {
                caps.expand(replacement, &mut out);
            }
            last = m.end();
            count += 1;
        }

        out.push_str(&space[last..]);
        (out, count)
    }
}

fn to_span(space: &str, m: regex::Match<'_>) -> Span {
    let start = space[..m.start()].chars().count();
    Span {
        start,
        end: start + m.as_str().chars().count(),
    }
}

/// Converts a character offset into a byte offset, clamped to `text.len()`.
#[must_use]
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Returns the substring between two character offsets, clamped to the text.
#[must_use]
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end).max(start_byte);
    &text[start_byte..end_byte]
}
