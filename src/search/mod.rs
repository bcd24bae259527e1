//! Find/replace over a text host.
//!
//! # Flow
//!
//! A caller edits criteria on a [`SearchController`] (each edit marks the
//! search fresh), then invokes one of four operations, directly or through
//! [`FindAction`] dispatch. The controller compiles the criteria, reads the
//! host's text and selection, and writes back a new selection or a
//! replacement. Criteria the user entered are recorded to history once an
//! operation has run with them.

pub mod action;
pub mod controller;
pub mod criteria;
pub mod notify;
pub mod pattern;

pub use action::{FindAction, Outcome};
pub use controller::{SearchController, SearchSession};
pub use criteria::{CriteriaField, FieldError, FieldValue, SearchCriteria};
pub use notify::{LogNotifier, Notification, NotificationLog, Notifier};
pub use pattern::{CompiledPattern, MatchFlags, PatternError, Span, compile_criteria};
