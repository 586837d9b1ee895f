//! Error type for document handling.
//!
//! These are hard failures: a document that cannot be read or does not follow
//! the expected vocabulary aborts the run. Merge problems are not errors in
//! this sense; they are collected as [`crate::merge::Finding`]s.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error represents a failure to read, interpret or write a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("failed to write markup: {0}")]
    Write(#[from] std::io::Error),

    #[error("document has no root element")]
    EmptyDocument,

    #[error("unbalanced closing tag </{0}>")]
    UnbalancedTag(String),

    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: &'static str },

    #[error("<{element}> has invalid {attribute} value '{value}'")]
    InvalidValue {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("unknown channel type <{0}>")]
    UnknownChannelType(String),

    #[error("no ports left to allocate for {0}")]
    PortsExhausted(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

impl Error {
    /// Creates an I/O error bound to the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: &'static str) -> Self {
        Error::MissingAttribute {
            element: element.into(),
            attribute,
        }
    }

    /// Creates an invalid attribute value error.
    pub fn invalid_value(
        element: impl Into<String>,
        attribute: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Error::InvalidValue {
            element: element.into(),
            attribute,
            value: value.into(),
        }
    }
}
