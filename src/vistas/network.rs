//! Flat channel registry and its merge.

use super::allocator::AddressAllocator;
use super::channel::{Channel, Direction};
use crate::error::{Error, Result};
use crate::merge::{union_entry, Finding, Report, Union};
use crate::xml::Element;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

pub const NETWORK: &str = "Network";
pub const VIRTUAL_COMPONENT: &str = "VirtualComponent";

/// A component as declared in one document, channels in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl {
    pub name: String,
    pub channels: Vec<Channel>,
}

/// NetworkDocument is one parsed input, with every channel occurrence
/// already holding its allocated endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDocument {
    pub components: Vec<ComponentDecl>,
}

impl NetworkDocument {
    /// Reads a `Network` document, allocating one endpoint per channel
    /// occurrence in document order.
    pub fn parse(root: &Element, allocator: &mut AddressAllocator) -> Result<Self> {
        if root.name != NETWORK {
            return Err(Error::UnexpectedRoot {
                expected: NETWORK,
                found: root.name.clone(),
            });
        }

        let mut components = Vec::new();
        for vc in root.children_named(VIRTUAL_COMPONENT) {
            let name = vc.required("Name")?.to_owned();
            let mut channels = Vec::with_capacity(vc.children.len());
            for element in &vc.children {
                let mut channel = Channel::from_element(element)?;
                channel.endpoint = Some(allocator.allocate(channel.kind)?);
                channels.push(channel);
            }
            components.push(ComponentDecl { name, channels });
        }
        Ok(NetworkDocument { components })
    }

    /// Writes each occurrence's endpoint onto the `Socket` children of the
    /// tree it was parsed from.
    pub fn stamp_endpoints(&self, root: &mut Element) {
        let declared = root.children_named_mut(VIRTUAL_COMPONENT);
        for (vc, component) in declared.zip(&self.components) {
            for (element, channel) in vc.children.iter_mut().zip(&component.channels) {
                let Some(endpoint) = channel.endpoint else {
                    continue;
                };
                for socket in element.children_named_mut("Socket") {
                    endpoint.stamp(socket);
                }
            }
        }
    }
}

/// VirtualComponent names the registry channels it consumes and produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualComponent {
    pub name: String,
    pub inputs: IndexSet<String>,
    pub outputs: IndexSet<String>,
}

impl VirtualComponent {
    fn new(name: String) -> Self {
        VirtualComponent {
            name,
            inputs: IndexSet::new(),
            outputs: IndexSet::new(),
        }
    }
}

/// Network is the accumulated registry.
///
/// Channels are stored once, by name; components refer to them by name, so
/// a header override is visible from every component using the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    channels: IndexMap<String, Channel>,
    components: IndexMap<String, VirtualComponent>,
    producers: IndexMap<String, String>,
}

impl Network {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Network::default()
    }

    /// Returns the registry channel with the given name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    /// Returns the component with the given name.
    pub fn component(&self, name: &str) -> Option<&VirtualComponent> {
        self.components.get(name)
    }

    /// Returns the component currently recorded as producing `channel`.
    pub fn producer(&self, channel: &str) -> Option<&str> {
        self.producers.get(channel).map(String::as_str)
    }

    /// Iterates over the registry channels in first-seen order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Folds a parsed document into the registry.
    pub fn merge(&mut self, document: NetworkDocument, report: &mut Report) {
        for decl in document.components {
            info!("VirtualComponent : {}", decl.name);
            if self.components.contains_key(&decl.name) {
                report.record(Finding::DuplicateComponent {
                    name: decl.name.clone(),
                });
            } else {
                self.components
                    .insert(decl.name.clone(), VirtualComponent::new(decl.name.clone()));
            }

            for channel in decl.channels {
                self.declare(&decl.name, channel, report);
            }
        }
    }

    fn declare(&mut self, component: &str, channel: Channel, report: &mut Report) {
        let name = channel.name.clone();
        let direction = channel.direction;

        match union_entry(&mut self.channels, name.clone(), channel) {
            Union::Inserted(_) => debug!("channel {} registered", name),
            Union::Existing { existing, incoming } => {
                if !incoming.is_compatible(existing) {
                    report.record(Finding::incompatible("channel", &name, &incoming, &*existing));
                } else {
                    if !incoming.has_same_header(existing) {
                        report.record(Finding::HeaderMismatch {
                            channel: name.clone(),
                            new: incoming.to_string(),
                            existing: existing.to_string(),
                        });
                    }
                    // The producer's view of the header is authoritative.
                    if existing.direction == Direction::In && incoming.direction == Direction::Out
                    {
                        existing.header = incoming.header;
                    }
                }
            }
        }

        let Some(vc) = self.components.get_mut(component) else {
            return;
        };
        match direction {
            Direction::Out => {
                if vc.outputs.contains(&name) {
                    report.record(Finding::ProducedTwice {
                        channel: name.clone(),
                    });
                } else if let Some(producer) = self.producers.get(&name) {
                    report.record(Finding::MultipleProducers {
                        channel: name.clone(),
                        producer: producer.clone(),
                    });
                }
                self.producers.insert(name.clone(), vc.name.clone());
                vc.outputs.insert(name);
            }
            Direction::In => {
                if !vc.inputs.insert(name.clone()) {
                    report.record(Finding::ConsumedTwice { channel: name });
                }
            }
        }
    }

    /// Renders the merged registry: one `VirtualComponent` per component,
    /// inputs first, then outputs.
    pub fn to_element(&self) -> Element {
        let mut root = Element::new(NETWORK);
        for vc in self.components.values() {
            let element =
                root.push(Element::new(VIRTUAL_COMPONENT).with_attribute("Name", vc.name.as_str()));
            let declared = vc
                .inputs
                .iter()
                .map(|name| (name, Direction::In))
                .chain(vc.outputs.iter().map(|name| (name, Direction::Out)));
            for (name, direction) in declared {
                if let Some(channel) = self.channels.get(name) {
                    element.push(channel.to_element(direction));
                }
            }
        }
        root
    }
}
