//! Channel definitions of the flat network registry.

use super::allocator::Endpoint;
use crate::error::{Error, Result};
use crate::xml::Element;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ChannelType is the wire format of a channel; it is also the element name
/// of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    #[serde(rename = "A429_Channel")]
    A429,
    #[serde(rename = "A664_Channel")]
    A664,
    #[serde(rename = "A825_Channel")]
    A825,
    #[serde(rename = "MIL_BUS_Channel")]
    MilBus,
    #[serde(rename = "Discrete_Channel")]
    Discrete,
    #[serde(rename = "Analog_Channel")]
    Analog,
    #[serde(rename = "NAD_Channel")]
    Nad,
}

impl ChannelType {
    /// All channel types.
    pub const ALL: [ChannelType; 7] = [
        ChannelType::A429,
        ChannelType::A664,
        ChannelType::A825,
        ChannelType::MilBus,
        ChannelType::Discrete,
        ChannelType::Analog,
        ChannelType::Nad,
    ];

    /// Returns the element name of the channel type.
    pub fn tag(self) -> &'static str {
        match self {
            ChannelType::A429 => "A429_Channel",
            ChannelType::A664 => "A664_Channel",
            ChannelType::A825 => "A825_Channel",
            ChannelType::MilBus => "MIL_BUS_Channel",
            ChannelType::Discrete => "Discrete_Channel",
            ChannelType::Analog => "Analog_Channel",
            ChannelType::Nad => "NAD_Channel",
        }
    }
}

impl FromStr for ChannelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChannelType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::UnknownChannelType(s.to_string()))
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Direction of a channel as seen from the declaring component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Returns the attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "In",
            Direction::Out => "Out",
        }
    }

    /// Returns the other direction.
    pub fn inverted(self) -> Direction {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    /// Parses an attribute value.
    pub fn parse(value: &str) -> Option<Direction> {
        match value {
            "In" => Some(Direction::In),
            "Out" => Some(Direction::Out),
            _ => None,
        }
    }
}

/// Presence flag of a header field, written `Yes` or `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    Yes,
    #[default]
    No,
}

impl Presence {
    fn as_str(self) -> &'static str {
        match self {
            Presence::Yes => "Yes",
            Presence::No => "No",
        }
    }

    fn read(element: &Element, attribute: &'static str) -> Result<Presence> {
        match element.required(attribute)? {
            "Yes" => Ok(Presence::Yes),
            "No" => Ok(Presence::No),
            other => Err(Error::invalid_value(&element.name, attribute, other)),
        }
    }
}

/// Header descriptor of a channel. Every field is absent by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub src_id: Presence,
    pub sn: Presence,
    pub qos_timestamp: Presence,
    pub data_timestamp: Presence,
}

impl Header {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Header {
            src_id: Presence::read(element, "Src_Id")?,
            sn: Presence::read(element, "SN")?,
            qos_timestamp: Presence::read(element, "QoS_Timestamp")?,
            data_timestamp: Presence::read(element, "Data_Timestamp")?,
        })
    }

    fn to_element(self) -> Element {
        Element::new("Header")
            .with_attribute("Src_Id", self.src_id.as_str())
            .with_attribute("SN", self.sn.as_str())
            .with_attribute("QoS_Timestamp", self.qos_timestamp.as_str())
            .with_attribute("Data_Timestamp", self.data_timestamp.as_str())
    }
}

/// Layout of one signal inside a channel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub byte_offset: String,
    pub kind: Option<String>,
    pub size: Option<String>,
    pub unit: Option<String>,
}

/// Channel is a named, typed, directional link between components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub kind: ChannelType,
    pub direction: Direction,
    pub fifo_size: String,
    pub message_max_size: String,
    pub header: Header,
    pub signals: IndexMap<String, Signal>,
    /// Assigned when the declaring document is parsed.
    pub endpoint: Option<Endpoint>,
}

impl Channel {
    /// Reads a channel element. The endpoint is left unset.
    pub fn from_element(element: &Element) -> Result<Self> {
        let kind: ChannelType = element.name.parse()?;
        let direction_value = element.required("Direction")?;
        let direction = Direction::parse(direction_value)
            .ok_or_else(|| Error::invalid_value(&element.name, "Direction", direction_value))?;

        // The last Header element wins.
        let mut header = Header::default();
        for header_element in element.children_named("Header") {
            header = Header::from_element(header_element)?;
        }

        let mut signals = IndexMap::new();
        for group in element.children_named("Signals") {
            for signal in group.children_named("Signal") {
                signals.insert(
                    signal.required("Name")?.to_owned(),
                    Signal {
                        byte_offset: signal.required("ByteOffset")?.to_owned(),
                        kind: signal.attribute("Type").map(str::to_owned),
                        size: signal.attribute("Size").map(str::to_owned),
                        unit: signal.attribute("Unit").map(str::to_owned),
                    },
                );
            }
        }

        Ok(Channel {
            name: element.required("Name")?.to_owned(),
            kind,
            direction,
            fifo_size: element.required("FifoSize")?.to_owned(),
            message_max_size: element.required("MessageMaxSize")?.to_owned(),
            header,
            signals,
            endpoint: None,
        })
    }

    /// Renders the channel as declared in the given direction.
    pub fn to_element(&self, direction: Direction) -> Element {
        let mut element = Element::new(self.kind.tag())
            .with_attribute("Name", self.name.as_str())
            .with_attribute("Direction", direction.as_str())
            .with_attribute("MessageMaxSize", self.message_max_size.as_str())
            .with_attribute("FifoSize", self.fifo_size.as_str());

        if let Some(endpoint) = self.endpoint {
            element.push(endpoint.to_element());
        }
        element.push(self.header.to_element());

        if !self.signals.is_empty() {
            let group = element.push(Element::new("Signals"));
            for (name, signal) in &self.signals {
                let mut el = Element::new("Signal")
                    .with_attribute("Name", name.as_str())
                    .with_attribute("ByteOffset", signal.byte_offset.as_str());
                el.set_optional("Type", signal.kind.as_deref());
                el.set_optional("Size", signal.size.as_deref());
                el.set_optional("Unit", signal.unit.as_deref());
                group.push(el);
            }
        }
        element
    }

    /// Returns true if `other` describes the same link: type, FIFO depth,
    /// maximum size and signal layout must match.
    pub fn is_compatible(&self, other: &Channel) -> bool {
        self.kind == other.kind
            && self.fifo_size == other.fifo_size
            && self.message_max_size == other.message_max_size
            && self.signals == other.signals
    }

    /// Returns true if both channels carry the same header fields.
    pub fn has_same_header(&self, other: &Channel) -> bool {
        self.header == other.header
    }
}

/// One-line summary used in diagnostics.
impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(Name={}, Direction={}, FifoSize={}, MessageMaxSize={}, {}, signals=[",
            self.kind,
            self.name,
            self.direction.as_str(),
            self.fifo_size,
            self.message_max_size,
            self.header.to_element(),
        )?;
        for (i, name) in self.signals.keys().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "])")
    }
}
