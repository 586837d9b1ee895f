//! Resolver runs: input checks, the fold over inputs, and output writing.
//!
//! Both variants follow the same sequence. Every input is checked for
//! existence before any of them is read; each document is parsed and folded
//! into the accumulator in command-line order; the counts are printed; the
//! merged document is written only when no error was found.

use crate::error::{Error, Result};
use crate::ims::Platform;
use crate::merge::Report;
use crate::vistas::{AddressAllocator, Network, NetworkDocument};
use crate::xml::{read_file, write_file, Element};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a resolver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub report: Report,
    /// True if the merged document was written.
    pub written: bool,
}

impl Summary {
    /// Returns true if the run found no error.
    pub fn succeeded(&self) -> bool {
        self.report.errors() == 0
    }
}

/// Fails with [`Error::MissingInput`] on the first input that is not a file.
pub fn check_inputs(inputs: &[PathBuf]) -> Result<()> {
    match inputs.iter().find(|path| !path.is_file()) {
        Some(missing) => Err(Error::MissingInput(missing.clone())),
        None => Ok(()),
    }
}

/// Merges hierarchical platform documents into `output`.
pub fn resolve_platform(inputs: &[PathBuf], output: &Path) -> Result<Summary> {
    check_inputs(inputs)?;

    let mut report = Report::new();
    let mut platform = Platform::new();
    for input in inputs {
        let root = read_file(input)?;
        let document = Platform::parse(&root, &mut report)?;
        platform.merge(document, &mut report);
    }

    finish(report, output, platform.to_element())
}

/// Merges flat network documents into `output`, allocating endpoints from
/// `allocator`. With `write_resolved`, every input is also written back next
/// to itself with its endpoints filled in, see [`resolved_path`].
pub fn resolve_network(
    inputs: &[PathBuf],
    output: &Path,
    mut allocator: AddressAllocator,
    write_resolved: bool,
) -> Result<Summary> {
    check_inputs(inputs)?;

    let mut report = Report::new();
    let mut network = Network::new();
    for input in inputs {
        let mut root = read_file(input)?;
        let document = NetworkDocument::parse(&root, &mut allocator)?;

        if write_resolved {
            document.stamp_endpoints(&mut root);
            root.indent();
            write_file(&resolved_path(input), &root)?;
        }

        network.merge(document, &mut report);
    }

    finish(report, output, network.to_element())
}

/// Returns `dir/name_resolved.ext` for `dir/name.ext`.
pub fn resolved_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_resolved.{}", stem, ext.to_string_lossy()),
        None => format!("{}_resolved", stem),
    };
    input.with_file_name(name)
}

/// Writes the findings of a run as JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    info!("Writing report : {}", path.display());
    let encoded = report.to_json()?;
    std::fs::write(path, encoded).map_err(|e| Error::io(path, e))
}

fn finish(report: Report, output: &Path, mut merged: Element) -> Result<Summary> {
    println!("Errors : {}", report.errors());
    println!("Warnings : {}", report.warnings());

    if report.errors() > 0 {
        println!("There were errors, aborting");
        return Ok(Summary {
            report,
            written: false,
        });
    }

    merged.indent();
    write_file(output, &merged)?;
    println!("Resolve done");
    Ok(Summary {
        report,
        written: true,
    })
}
