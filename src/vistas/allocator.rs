//! Sequential multicast endpoint allocation per channel type.

use super::channel::ChannelType;
use crate::error::{Error, Result};
use crate::xml::Element;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::debug;

/// Base endpoint of every channel type.
pub const DEFAULT_ENDPOINTS: [(ChannelType, Endpoint); 7] = [
    (ChannelType::A429, Endpoint::new(Ipv4Addr::new(224, 225, 100, 0), 6000)),
    (ChannelType::A664, Endpoint::new(Ipv4Addr::new(224, 226, 100, 0), 6000)),
    (ChannelType::A825, Endpoint::new(Ipv4Addr::new(224, 227, 100, 0), 6000)),
    (ChannelType::MilBus, Endpoint::new(Ipv4Addr::new(224, 228, 100, 0), 6000)),
    (ChannelType::Discrete, Endpoint::new(Ipv4Addr::new(224, 229, 100, 0), 6000)),
    (ChannelType::Analog, Endpoint::new(Ipv4Addr::new(224, 230, 100, 0), 6000)),
    (ChannelType::Nad, Endpoint::new(Ipv4Addr::new(224, 231, 100, 0), 6000)),
];

/// Endpoint is a destination address and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    /// Creates a new Endpoint.
    pub const fn new(ip: Ipv4Addr, port: u16) -> Self {
        Endpoint { ip, port }
    }

    /// Renders the endpoint as a `Socket` element.
    pub fn to_element(self) -> Element {
        let mut element = Element::new("Socket");
        self.stamp(&mut element);
        element
    }

    /// Writes `DstIP`/`DstPort` onto an existing `Socket` element.
    pub fn stamp(self, socket: &mut Element) {
        socket.set("DstIP", self.ip.to_string());
        socket.set("DstPort", self.port.to_string());
    }
}

/// AddressAllocator hands out endpoints in order: each call returns the
/// cursor of the type and moves its port forward by one. The address itself
/// never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAllocator {
    cursors: IndexMap<ChannelType, Endpoint>,
}

impl Default for AddressAllocator {
    fn default() -> Self {
        AddressAllocator::new(DEFAULT_ENDPOINTS)
    }
}

impl AddressAllocator {
    /// Creates an allocator seeded with the given base endpoints.
    pub fn new(bases: impl IntoIterator<Item = (ChannelType, Endpoint)>) -> Self {
        AddressAllocator {
            cursors: bases.into_iter().collect(),
        }
    }

    /// Returns the endpoint the next channel of `kind` will get.
    pub fn peek(&self, kind: ChannelType) -> Option<Endpoint> {
        self.cursors.get(&kind).copied()
    }

    /// Assigns the current endpoint of `kind` and advances the cursor.
    pub fn allocate(&mut self, kind: ChannelType) -> Result<Endpoint> {
        let cursor = self
            .cursors
            .get_mut(&kind)
            .ok_or_else(|| Error::UnknownChannelType(kind.to_string()))?;
        let assigned = *cursor;
        cursor.port = cursor
            .port
            .checked_add(1)
            .ok_or_else(|| Error::PortsExhausted(kind.to_string()))?;
        debug!("{} assigned {}:{}", kind, assigned.ip, assigned.port);
        Ok(assigned)
    }
}
