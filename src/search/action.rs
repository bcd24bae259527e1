//! Enumerated search operations.
//!
//! Dialog controls are identified by name; each name maps to exactly one
//! [`FindAction`], and the controller maps each action to its handler.

/// A find/replace operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindAction {
    /// Select the next match.
    FindNext,
    /// Select the previous match.
    FindPrevious,
    /// Replace the current (or next) match, then select the following one.
    ReplaceAndFind,
    /// Replace every match in scope.
    ReplaceAll,
}

impl FindAction {
    /// All actions.
    pub const ALL: [Self; 4] = [
        Self::FindNext,
        Self::FindPrevious,
        Self::ReplaceAndFind,
        Self::ReplaceAll,
    ];

    /// Parses a control name into an action.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "find_next" | "next" => Some(Self::FindNext),
            "find_previous" | "find_prev" | "previous" | "prev" => Some(Self::FindPrevious),
            "replace_and_find" | "replace" => Some(Self::ReplaceAndFind),
            "replace_all" => Some(Self::ReplaceAll),
            _ => None,
        }
    }

    /// Returns the control name for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FindNext => "find_next",
            Self::FindPrevious => "find_previous",
            Self::ReplaceAndFind => "replace_and_find",
            Self::ReplaceAll => "replace_all",
        }
    }

    /// Returns true for the two pure navigation actions.
    #[must_use]
    pub const fn is_find(self) -> bool {
        matches!(self, Self::FindNext | Self::FindPrevious)
    }

    /// Returns true if the caller should offer compact next/previous repeat
    /// controls after this action produced `outcome`.
    #[must_use]
    pub fn offers_repeat(self, outcome: Outcome) -> bool {
        self.is_find() && outcome == Outcome::Found
    }
}

/// Result of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A match is now selected.
    Found,
    /// Nothing matched; the selection is unchanged.
    NotFound,
    /// Replace-all finished with this many replacements.
    Replaced(usize),
}

impl Outcome {
    /// Builds a find outcome from a found flag.
    #[must_use]
    pub const fn from_found(found: bool) -> Self {
        if found { Self::Found } else { Self::NotFound }
    }
}
