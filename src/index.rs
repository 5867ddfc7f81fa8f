//! Index structures.
//!
//! - [`inverted`] - Word to document postings with the mirrored per-document view

pub mod inverted;
