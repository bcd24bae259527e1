//! Ratfind
//!
//! Find/replace engine for editors: literal or regex search, optional case
//! sensitivity, optional selection-only scope, one-at-a-time or bulk
//! replacement, and a persisted history of recent searches.
//!
//! # Architecture
//!
//! - **Search Module**: criteria, pattern compilation, and the
//!   `SearchController` state machine
//! - **History Module**: bounded most-recent-first criteria list and its
//!   persistence
//! - **Editor Module**: the text-host contract and a ropey reference buffer
//! - **Config / Logging**: `.ratfindrc` parsing and file-based tracing
//!
//! # Usage
//!
//! ```
//! use ratfind::editor::Buffer;
//! use ratfind::history::MemorySettingsStore;
//! use ratfind::search::{NotificationLog, SearchController};
//!
//! let mut buffer = Buffer::from_str("cat dog cat");
//! let mut find = SearchController::new(MemorySettingsStore::default(), NotificationLog::new());
//! find.on_pattern_changed("cat");
//! assert!(find.find_next(&mut buffer).expect("valid pattern"));
//! assert_eq!(buffer.selection(), (0, 3));
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_excessive_bools)]

pub mod config;
pub mod editor;
pub mod history;
pub mod logging;
pub mod search;

// Re-export main types
pub use config::Config;
pub use editor::{Buffer, TextHost};
pub use history::{HistoryDirection, HistoryStore, JsonSettingsStore, SettingsStore};
pub use search::{FindAction, Outcome, PatternError, SearchController, SearchCriteria};
