//! Findings produced while merging documents.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Ambiguous but resolvable; never blocks output.
    Warning,
    /// Incompatible redefinition or structural violation; blocks output.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// Finding is one problem detected while folding a document into the
/// accumulated model.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Two records sharing a key disagree on a non-key attribute.
    #[error("two incompatible definitions of {family} {key} :\n{new}\n{existing}")]
    Incompatible {
        family: String,
        key: String,
        new: String,
        existing: String,
    },

    /// A virtual component name is declared more than once.
    #[error("several VirtualComponents have the name {name}")]
    DuplicateComponent { name: String },

    /// Two compatible channel definitions disagree on header fields.
    #[error("two incompatible definitions of header for channel {channel} :\n{new}\n{existing}")]
    HeaderMismatch {
        channel: String,
        new: String,
        existing: String,
    },

    /// A component declares the same output channel twice.
    #[error("the channel {channel} is already produced by the same VirtualComponent")]
    ProducedTwice { channel: String },

    /// A channel is produced by more than one component.
    #[error("the channel {channel} is already produced by VirtualComponent {producer}")]
    MultipleProducers { channel: String, producer: String },

    /// A component declares the same input channel twice.
    #[error("the channel {channel} is already consumed by the same VirtualComponent")]
    ConsumedTwice { channel: String },

    /// A construct the model cannot represent was dropped.
    #[error("{what} not supported, {key} ignored")]
    Unsupported { what: String, key: String },
}

impl Finding {
    /// Creates an incompatible-definition finding.
    pub fn incompatible(
        family: impl fmt::Display,
        key: impl Into<String>,
        new: impl fmt::Display,
        existing: impl fmt::Display,
    ) -> Self {
        Finding::Incompatible {
            family: family.to_string(),
            key: key.into(),
            new: new.to_string(),
            existing: existing.to_string(),
        }
    }

    /// Returns how serious this finding is.
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Incompatible { .. } | Finding::DuplicateComponent { .. } => Severity::Error,
            Finding::HeaderMismatch { .. }
            | Finding::ProducedTwice { .. }
            | Finding::MultipleProducers { .. }
            | Finding::ConsumedTwice { .. }
            | Finding::Unsupported { .. } => Severity::Warning,
        }
    }

    /// Returns true if this finding blocks output.
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Report collects the findings of a whole run, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    /// Creates a new empty Report.
    pub fn new() -> Self {
        Report::default()
    }

    /// Records a finding and logs it at the matching level.
    pub fn record(&mut self, finding: Finding) {
        match finding.severity() {
            Severity::Error => error!("{}", finding),
            Severity::Warning => warn!("{}", finding),
        }
        self.findings.push(finding);
    }

    /// Returns the number of error findings.
    pub fn errors(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Returns the number of warning findings.
    pub fn warnings(&self) -> usize {
        self.findings.len() - self.errors()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns an iterator over the findings.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    /// Encodes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Encoded<'a> {
            errors: usize,
            warnings: usize,
            findings: &'a [Finding],
        }
        serde_json::to_string_pretty(&Encoded {
            errors: self.errors(),
            warnings: self.warnings(),
            findings: &self.findings,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} : {}", finding.severity(), finding)?;
        }
        Ok(())
    }
}
