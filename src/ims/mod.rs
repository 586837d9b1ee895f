//! IMS module - Hierarchical equipment/application configuration.
//!
//! A document is a `VirtualComponent` root holding an optional top-level
//! DataExchange and Equipment elements; every Equipment and Application owns
//! a DataExchange made of six protocol family containers.

mod exchange;
mod platform;
mod protocol;
mod record;

#[cfg(test)]
mod merge_test;

pub use exchange::*;
pub use platform::*;
pub use protocol::*;
pub use record::*;
