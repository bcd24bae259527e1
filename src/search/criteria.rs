//! Search criteria and field mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything needed to run one find/replace: the pattern, how to match it,
/// where to look, and what to substitute.
///
/// Two criteria are the same history entry iff all five fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Raw find text as typed.
    #[serde(rename = "find_text")]
    pub pattern: String,
    /// Interpret `pattern` as a regular expression instead of literal text.
    #[serde(rename = "use_regex")]
    pub is_regex: bool,
    /// Match case exactly.
    pub case_sensitive: bool,
    /// Restrict matching to the current selection span.
    pub selection_only: bool,
    /// Replacement text.
    #[serde(rename = "replace_text")]
    pub replacement: String,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            is_regex: true,
            case_sensitive: false,
            selection_only: false,
            replacement: String::new(),
        }
    }
}

impl SearchCriteria {
    /// Creates regex criteria with default flags.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Creates literal (non-regex) criteria with default flags.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: false,
            ..Self::default()
        }
    }

    /// Sets the replacement text.
    #[must_use]
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    /// Sets case sensitivity.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets selection-only scope.
    #[must_use]
    pub fn with_selection_only(mut self, selection_only: bool) -> Self {
        self.selection_only = selection_only;
        self
    }

    /// Applies a single field update.
    ///
    /// # Errors
    /// Returns [`FieldError::Mismatch`] if `value` is the wrong kind for `field`.
    pub fn apply(&mut self, field: CriteriaField, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            (CriteriaField::UseRegex, FieldValue::Flag(v)) => self.is_regex = v,
            (CriteriaField::CaseSensitive, FieldValue::Flag(v)) => self.case_sensitive = v,
            (CriteriaField::SelectionOnly, FieldValue::Flag(v)) => self.selection_only = v,
            (CriteriaField::FindText, FieldValue::Text(v)) => self.pattern = v,
            (CriteriaField::ReplaceText, FieldValue::Text(v)) => self.replacement = v,
            (field, _) => {
                return Err(FieldError::Mismatch {
                    field: field.as_str(),
                    expected: field.expected_kind(),
                });
            }
        }
        Ok(())
    }
}

/// A settable criteria field, named the way dialog controls name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaField {
    /// `use_regex` flag.
    UseRegex,
    /// `case_sensitive` flag.
    CaseSensitive,
    /// `selection_only` flag.
    SelectionOnly,
    /// `find_text` input.
    FindText,
    /// `replace_text` input.
    ReplaceText,
}

impl CriteriaField {
    /// All fields in dialog order.
    pub const ALL: [Self; 5] = [
        Self::UseRegex,
        Self::CaseSensitive,
        Self::SelectionOnly,
        Self::FindText,
        Self::ReplaceText,
    ];

    /// Parses a control name into a field.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "use_regex" | "regex" => Some(Self::UseRegex),
            "case_sensitive" | "match_case" => Some(Self::CaseSensitive),
            "selection_only" | "in_selection" => Some(Self::SelectionOnly),
            "find_text" | "pattern" => Some(Self::FindText),
            "replace_text" | "replacement" => Some(Self::ReplaceText),
            _ => None,
        }
    }

    /// Returns the control name for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UseRegex => "use_regex",
            Self::CaseSensitive => "case_sensitive",
            Self::SelectionOnly => "selection_only",
            Self::FindText => "find_text",
            Self::ReplaceText => "replace_text",
        }
    }

    /// Returns true for the two free-text inputs.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::FindText | Self::ReplaceText)
    }

    const fn expected_kind(self) -> &'static str {
        if self.is_text() { "text" } else { "flag" }
    }
}

/// A new value for a [`CriteriaField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Switch value.
    Flag(bool),
    /// Text input value.
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Field update error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The value kind does not fit the field.
    #[error("Field {field} expects a {expected} value")]
    Mismatch {
        /// Control name of the field.
        field: &'static str,
        /// Value kind the field accepts.
        expected: &'static str,
    },
}
