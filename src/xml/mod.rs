//! XML module - Attribute-bearing element trees.
//!
//! Documents are fully materialized as [`Element`] trees before the typed
//! models are built from them, and the merged models are rendered back into
//! trees before being written.

mod element;
mod reader;
mod writer;

pub use element::*;
pub use reader::*;
pub use writer::*;
