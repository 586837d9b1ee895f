//! Merge module - Folding documents into an accumulated model.
//!
//! This module provides the severity model shared by both pipelines and the
//! keyed union primitive they are built on.

mod report;
mod union;

pub use report::*;
pub use union::*;
