//! Leaf record schemas of the six protocol families.
//!
//! Every attribute is kept as text; compatibility is exact equality over
//! every non-key attribute, with two absent optionals comparing equal.

use crate::error::Result;
use crate::xml::Element;
use std::fmt;

/// Family is one of the six wire-format families of a DataExchange, in the
/// order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Afdx,
    A429,
    Can,
    Discrete,
    Analogue,
    Nad,
}

impl Family {
    /// All families, in canonical output order.
    pub const ALL: [Family; 6] = [
        Family::Afdx,
        Family::A429,
        Family::Can,
        Family::Discrete,
        Family::Analogue,
        Family::Nad,
    ];

    /// Returns the element name of the family container.
    pub fn tag(self) -> &'static str {
        match self {
            Family::Afdx => "AFDX",
            Family::A429 => "A429",
            Family::Can => "CAN",
            Family::Discrete => "DISCRETE",
            Family::Analogue => "ANALOGUE",
            Family::Nad => "NAD",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Record is a leaf definition stored in a keyed collection.
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// Element name of the record.
    const TAG: &'static str;
    /// Family the record belongs to, used when reporting conflicts.
    const FAMILY: Family;

    /// Returns the key of the record within its parent collection.
    fn key(&self) -> &str;

    /// Reads the record from its element.
    fn from_element(element: &Element) -> Result<Self>;

    /// Renders the record as an element, attributes in canonical order.
    fn to_element(&self) -> Element;

    /// Returns true if `other` may share this record's key without conflict.
    fn is_compatible(&self, other: &Self) -> bool {
        self == other
    }
}

/// Declares a record struct together with its [`Record`] implementation.
///
/// Required attributes are listed first, then optional ones; that is also
/// the order they are written in.
macro_rules! record {
    (
        $(#[$meta:meta])*
        $name:ident = $tag:literal in $family:ident, key $key:ident {
            $($field:ident: $attr:literal),+ $(,)?
        }
        optional {
            $($opt:ident: $opt_attr:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: String,)+
            $(pub $opt: Option<String>,)*
        }

        impl Record for $name {
            const TAG: &'static str = $tag;
            const FAMILY: Family = Family::$family;

            fn key(&self) -> &str {
                &self.$key
            }

            fn from_element(element: &Element) -> Result<Self> {
                Ok($name {
                    $($field: element.required($attr)?.to_owned(),)+
                    $($opt: element.attribute($opt_attr).map(str::to_owned),)*
                })
            }

            fn to_element(&self) -> Element {
                let mut element = Element::new($tag);
                $(element.set($attr, self.$field.as_str());)+
                $(element.set_optional($opt_attr, self.$opt.as_deref());)*
                element
            }
        }
    };
}

record! {
    /// Periodic AFDX message.
    AfdxSamplingMessage = "SamplingMessage" in Afdx, key name {
        name: "Name",
        local_name: "LocalName",
        message_size_bytes: "MessageSizeBytes",
        validity_duration_us: "ValidityDurationUs",
    }
    optional {
        period_us: "PeriodUs",
    }
}

record! {
    /// FIFO-delivered AFDX message.
    AfdxQueuingMessage = "QueuingMessage" in Afdx, key name {
        name: "Name",
        local_name: "LocalName",
        max_size_bytes: "MaxSizeBytes",
        queue_depth: "QueueDepth",
    }
    optional {}
}

record! {
    /// Periodic ARINC 429 label, keyed by its local name within a bus.
    A429SamplingLabel = "SamplingLabel" in A429, key local_name {
        number: "Number",
        sdi: "Sdi",
        local_name: "LocalName",
        validity_duration_us: "ValidityDurationUs",
    }
    optional {
        period_us: "PeriodUs",
    }
}

record! {
    /// FIFO-delivered ARINC 429 label.
    A429QueuingLabel = "QueuingLabel" in A429, key local_name {
        number: "Number",
        sdi: "Sdi",
        local_name: "LocalName",
        queue_depth: "QueueDepth",
    }
    optional {}
}

record! {
    /// Periodic CAN frame, keyed by CAN id within a bus.
    CanSamplingMessage = "SamplingMessage" in Can, key id {
        id: "Id",
        local_name: "LocalName",
        message_size_bytes: "MessageSizeBytes",
        validity_duration_us: "ValidityDurationUs",
    }
    optional {
        period_us: "PeriodUs",
    }
}

record! {
    DiscreteSignal = "Signal" in Discrete, key name {
        name: "Name",
        local_name: "LocalName",
    }
    optional {
        true_state: "TrueState",
        false_state: "FalseState",
        hwpp: "HWPP",
        period_us: "PeriodUs",
        validity_duration_us: "ValidityDurationUs",
    }
}

record! {
    AnalogueSignal = "Signal" in Analogue, key name {
        name: "Name",
        local_name: "LocalName",
        scale_factor: "ScaleFactor",
        offset: "Offset",
    }
    optional {
        period_us: "PeriodUs",
        validity_duration_us: "ValidityDurationUs",
    }
}

record! {
    NadMessage = "Message" in Nad, key name {
        name: "Name",
        local_name: "LocalName",
        message_size_bytes: "MessageSizeBytes",
    }
    optional {
        period_us: "PeriodUs",
        message_type: "MessageType",
        message_dimension1: "MessageDimension1",
        message_dimension2: "MessageDimension2",
    }
}
