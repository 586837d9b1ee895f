//! Direction inversion of platform documents.
//!
//! Turns the description of a platform into the description of its test
//! counterpart: whatever the platform produces, the counterpart consumes.

use crate::error::Result;
use crate::ims::{CONSUMED_DATA, PRODUCED_DATA};
use crate::vistas::{Direction, VIRTUAL_COMPONENT};
use crate::xml::{read_file, write_file, Element};
use std::path::Path;

/// Prefix added to the name of every inverted component.
pub const INVERTED_PREFIX: &str = "Inverted";

/// Renames every `VirtualComponent` and toggles every `Direction` attribute
/// of a flat network document.
pub fn invert_network(root: &mut Element) {
    root.walk_mut(&mut |element| {
        if element.name == VIRTUAL_COMPONENT {
            if let Some(name) = element.attributes.get_mut("Name") {
                name.insert_str(0, INVERTED_PREFIX);
            }
            return;
        }
        if let Some(value) = element.attributes.get_mut("Direction") {
            if let Some(direction) = Direction::parse(value) {
                *value = direction.inverted().as_str().to_owned();
            }
        }
    });
}

/// Swaps the `ProducedData` and `ConsumedData` buckets of a hierarchical
/// platform document.
pub fn invert_exchange(root: &mut Element) {
    root.walk_mut(&mut |element| {
        if element.name == PRODUCED_DATA {
            element.name = CONSUMED_DATA.to_owned();
        } else if element.name == CONSUMED_DATA {
            element.name = PRODUCED_DATA.to_owned();
        }
    });
}

/// Inverts a network file and a platform file, writing both results.
pub fn invert_files(
    network: &Path,
    exchange: &Path,
    inverted_network: &Path,
    inverted_exchange: &Path,
) -> Result<()> {
    let mut network_tree = read_file(network)?;
    let mut exchange_tree = read_file(exchange)?;

    invert_network(&mut network_tree);
    invert_exchange(&mut exchange_tree);

    network_tree.indent();
    exchange_tree.indent();
    write_file(inverted_network, &network_tree)?;
    write_file(inverted_exchange, &exchange_tree)
}
