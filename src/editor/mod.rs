//! Text-buffer host layer.
//!
//! The search engine never owns text. It talks to whatever editor hosts it
//! through the [`TextHost`] contract: read the full text, read and move the
//! selection, and replace a half-open range. [`Buffer`] is a ropey-backed
//! reference host used by tests and by embedders without an editor of their
//! own.

pub mod buffer;
pub mod host;

pub use buffer::{Buffer, BufferError};
pub use host::TextHost;
