//! # Platform Resolver
//!
//! Merges partial descriptions of an avionics simulation platform, each
//! written by a different team, into one consolidated configuration.
//!
//! Two document families are supported:
//!
//! - hierarchical platform documents (equipments, applications and their
//!   data exchanges over six protocol families), see [`ims`];
//! - flat network documents (virtual components sharing typed channels),
//!   see [`vistas`], where every channel also gets a multicast endpoint.
//!
//! Redefinitions are merged by key. Compatible ones are silently unified,
//! ambiguous ones are reported as warnings and incompatible ones as errors;
//! a merged document is only written when no error was found.
//!
//! ## Modules
//!
//! - [`xml`] - Element trees, reading and indented writing
//! - [`merge`] - Findings, reports and the keyed union shared by both variants
//! - [`ims`] - Hierarchical platform documents
//! - [`vistas`] - Flat channel registry and address allocation
//! - [`invert`] - Producer/consumer inversion of both document kinds
//! - [`config`] - Resolver configuration file
//! - [`driver`] - Resolver runs over input files

pub mod config;
pub mod driver;
pub mod error;
pub mod ims;
pub mod invert;
pub mod merge;
pub mod vistas;
pub mod xml;

pub use config::ResolverConfig;
pub use driver::{resolve_network, resolve_platform, Summary};
pub use error::{Error, Result};
pub use ims::Platform;
pub use merge::{Finding, Report, Severity};
pub use vistas::{AddressAllocator, Network, NetworkDocument};
pub use xml::Element;
