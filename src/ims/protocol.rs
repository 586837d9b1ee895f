//! Protocol containers.
//!
//! A family container is a [`Directional`] pair of buckets. What a bucket
//! holds differs per family (flat records, records split by sampling and
//! queuing, or buses of those), and each shape implements [`Content`] so the
//! containers can be parsed, merged and written generically.

use super::record::{
    A429QueuingLabel, A429SamplingLabel, AfdxQueuingMessage, AfdxSamplingMessage,
    AnalogueSignal, CanSamplingMessage, DiscreteSignal, NadMessage, Record,
};
use crate::error::Result;
use crate::merge::{union_entry, Finding, Report, Union};
use crate::xml::Element;
use indexmap::IndexMap;

pub const PRODUCED_DATA: &str = "ProducedData";
pub const CONSUMED_DATA: &str = "ConsumedData";
const BUS: &str = "Bus";

/// Content is what one directional bucket of a family holds.
pub trait Content: Default {
    /// Reads the content from the children of `parent`.
    fn parse(parent: &Element, report: &mut Report) -> Result<Self>;

    /// Appends the content as children of `parent`.
    fn write_into(&self, parent: &mut Element);

    /// Folds `other` into `self`; existing entries always win.
    fn merge(&mut self, other: Self, report: &mut Report);

    /// Returns true if there is nothing to write.
    fn is_empty(&self) -> bool;
}

/// Records is an insertion-ordered keyed collection of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records<R> {
    entries: IndexMap<String, R>,
}

impl<R> Default for Records<R> {
    fn default() -> Self {
        Records {
            entries: IndexMap::new(),
        }
    }
}

impl<R: Record> Records<R> {
    /// Adds a record unless its key is taken. A taken key with a different
    /// definition is reported as an error and the existing record is kept.
    pub fn absorb(&mut self, record: R, report: &mut Report) {
        let key = record.key().to_owned();
        if let Union::Existing { existing, incoming } = union_entry(&mut self.entries, key, record)
        {
            if !incoming.is_compatible(existing) {
                report.record(Finding::incompatible(
                    R::FAMILY,
                    incoming.key(),
                    incoming.to_element(),
                    existing.to_element(),
                ));
            }
        }
    }

    /// Returns the record stored under `key`.
    pub fn get(&self, key: &str) -> Option<&R> {
        self.entries.get(key)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.entries.values()
    }
}

impl<R: Record> Content for Records<R> {
    fn parse(parent: &Element, report: &mut Report) -> Result<Self> {
        let mut records = Records::default();
        for child in parent.children_named(R::TAG) {
            records.absorb(R::from_element(child)?, report);
        }
        Ok(records)
    }

    fn write_into(&self, parent: &mut Element) {
        for record in self.entries.values() {
            parent.push(record.to_element());
        }
    }

    fn merge(&mut self, other: Self, report: &mut Report) {
        for record in other.entries.into_values() {
            self.absorb(record, report);
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sampling and queuing records side by side; samplings are written first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingQueuing<S, Q> {
    pub sampling: Records<S>,
    pub queuing: Records<Q>,
}

impl<S, Q> Default for SamplingQueuing<S, Q> {
    fn default() -> Self {
        SamplingQueuing {
            sampling: Records::default(),
            queuing: Records::default(),
        }
    }
}

impl<S: Record, Q: Record> Content for SamplingQueuing<S, Q> {
    fn parse(parent: &Element, report: &mut Report) -> Result<Self> {
        Ok(SamplingQueuing {
            sampling: Records::parse(parent, report)?,
            queuing: Records::parse(parent, report)?,
        })
    }

    fn write_into(&self, parent: &mut Element) {
        self.sampling.write_into(parent);
        self.queuing.write_into(parent);
    }

    fn merge(&mut self, other: Self, report: &mut Report) {
        self.sampling.merge(other.sampling, report);
        self.queuing.merge(other.queuing, report);
    }

    fn is_empty(&self) -> bool {
        self.sampling.is_empty() && self.queuing.is_empty()
    }
}

/// CAN bus content. Only sampling frames are modelled; queuing frames are
/// reported and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanFrames {
    pub sampling: Records<CanSamplingMessage>,
}

impl Content for CanFrames {
    fn parse(parent: &Element, report: &mut Report) -> Result<Self> {
        for queuing in parent.children_named("QueuingMessage") {
            report.record(Finding::Unsupported {
                what: "CAN queuing message".to_string(),
                key: queuing.attribute("Id").unwrap_or_default().to_string(),
            });
        }
        Ok(CanFrames {
            sampling: Records::parse(parent, report)?,
        })
    }

    fn write_into(&self, parent: &mut Element) {
        self.sampling.write_into(parent);
    }

    fn merge(&mut self, other: Self, report: &mut Report) {
        self.sampling.merge(other.sampling, report);
    }

    fn is_empty(&self) -> bool {
        self.sampling.is_empty()
    }
}

/// Named buses, each holding its own content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buses<C> {
    buses: IndexMap<String, C>,
}

impl<C> Default for Buses<C> {
    fn default() -> Self {
        Buses {
            buses: IndexMap::new(),
        }
    }
}

impl<C: Content> Buses<C> {
    fn absorb(&mut self, name: String, content: C, report: &mut Report) {
        if let Union::Existing { existing, incoming } = union_entry(&mut self.buses, name, content) {
            existing.merge(incoming, report);
        }
    }

    /// Returns the content of the named bus.
    pub fn get(&self, name: &str) -> Option<&C> {
        self.buses.get(name)
    }

    /// Returns the number of buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    /// Returns true if no bus is declared.
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }
}

impl<C: Content> Content for Buses<C> {
    fn parse(parent: &Element, report: &mut Report) -> Result<Self> {
        let mut buses = Buses::default();
        for bus in parent.children_named(BUS) {
            let name = bus.required("Name")?.to_owned();
            let content = C::parse(bus, report)?;
            buses.absorb(name, content, report);
        }
        Ok(buses)
    }

    fn write_into(&self, parent: &mut Element) {
        for (name, content) in &self.buses {
            let bus = parent.push(Element::new(BUS).with_attribute("Name", name.as_str()));
            content.write_into(bus);
        }
    }

    fn merge(&mut self, other: Self, report: &mut Report) {
        for (name, content) in other.buses {
            self.absorb(name, content, report);
        }
    }

    // A declared bus is written even when it carries no record.
    fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }
}

/// Directional holds the produced and consumed buckets of one family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directional<C> {
    pub produced: C,
    pub consumed: C,
}

impl<C: Content> Directional<C> {
    /// Reads both buckets from a family element.
    pub fn parse(element: &Element, report: &mut Report) -> Result<Self> {
        let mut directional = Self::default();
        for data in element.children_named(CONSUMED_DATA) {
            let content = C::parse(data, report)?;
            directional.consumed.merge(content, report);
        }
        for data in element.children_named(PRODUCED_DATA) {
            let content = C::parse(data, report)?;
            directional.produced.merge(content, report);
        }
        Ok(directional)
    }

    /// Renders the family element; empty buckets are omitted.
    pub fn to_element(&self, tag: &str) -> Element {
        let mut element = Element::new(tag);
        if !self.produced.is_empty() {
            self.produced.write_into(element.push(Element::new(PRODUCED_DATA)));
        }
        if !self.consumed.is_empty() {
            self.consumed.write_into(element.push(Element::new(CONSUMED_DATA)));
        }
        element
    }

    /// Merges both buckets independently.
    pub fn merge(&mut self, other: Self, report: &mut Report) {
        self.consumed.merge(other.consumed, report);
        self.produced.merge(other.produced, report);
    }

    /// Returns true if both buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.produced.is_empty() && self.consumed.is_empty()
    }
}

pub type Afdx = Directional<SamplingQueuing<AfdxSamplingMessage, AfdxQueuingMessage>>;
pub type A429 = Directional<Buses<SamplingQueuing<A429SamplingLabel, A429QueuingLabel>>>;
pub type Can = Directional<Buses<CanFrames>>;
pub type Discrete = Directional<Records<DiscreteSignal>>;
pub type Analogue = Directional<Records<AnalogueSignal>>;
pub type Nad = Directional<Records<NadMessage>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    fn parse_afdx(source: &str, report: &mut Report) -> Afdx {
        Directional::parse(&parse_str(source).unwrap(), report).unwrap()
    }

    #[test]
    fn test_sampling_before_queuing() {
        let mut report = Report::new();
        let afdx = parse_afdx(
            r#"<AFDX><ProducedData>
                <QueuingMessage Name="Q" LocalName="q" MaxSizeBytes="8" QueueDepth="4"/>
                <SamplingMessage Name="S" LocalName="s" MessageSizeBytes="8" ValidityDurationUs="10"/>
            </ProducedData></AFDX>"#,
            &mut report,
        );
        let el = afdx.to_element("AFDX");
        assert_eq!(el.children.len(), 1);
        let names: Vec<_> = el.children[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["SamplingMessage", "QueuingMessage"]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_produced_and_consumed_are_independent() {
        let mut report = Report::new();
        let afdx = parse_afdx(
            r#"<AFDX>
                <ConsumedData><SamplingMessage Name="S" LocalName="a" MessageSizeBytes="8" ValidityDurationUs="10"/></ConsumedData>
                <ProducedData><SamplingMessage Name="S" LocalName="b" MessageSizeBytes="16" ValidityDurationUs="10"/></ProducedData>
            </AFDX>"#,
            &mut report,
        );
        assert!(report.is_empty());
        assert_eq!(afdx.produced.sampling.get("S").unwrap().local_name, "b");
        assert_eq!(afdx.consumed.sampling.get("S").unwrap().local_name, "a");

        let el = afdx.to_element("AFDX");
        let buckets: Vec<_> = el.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(buckets, vec!["ProducedData", "ConsumedData"]);
    }

    #[test]
    fn test_bus_merge_unions_labels() {
        let mut report = Report::new();
        let parse = |source: &str, report: &mut Report| -> A429 {
            Directional::parse(&parse_str(source).unwrap(), report).unwrap()
        };
        let mut dest = parse(
            r#"<A429><ProducedData><Bus Name="B1">
                <SamplingLabel Number="1" Sdi="0" LocalName="L1" ValidityDurationUs="10"/>
            </Bus></ProducedData></A429>"#,
            &mut report,
        );
        let other = parse(
            r#"<A429><ProducedData><Bus Name="B1">
                <SamplingLabel Number="1" Sdi="0" LocalName="L1" ValidityDurationUs="10"/>
                <QueuingLabel Number="2" Sdi="1" LocalName="L2" QueueDepth="3"/>
            </Bus><Bus Name="B2"/></ProducedData></A429>"#,
            &mut report,
        );
        dest.merge(other, &mut report);

        assert!(report.is_empty());
        assert_eq!(dest.produced.len(), 2);
        let b1 = dest.produced.get("B1").unwrap();
        assert_eq!(b1.sampling.len(), 1);
        assert_eq!(b1.queuing.len(), 1);
        assert!(dest.produced.get("B2").unwrap().is_empty());
    }

    #[test]
    fn test_label_conflict_inside_bus() {
        let mut report = Report::new();
        let source = r#"<A429><ConsumedData><Bus Name="B1">
                <SamplingLabel Number="1" Sdi="0" LocalName="L1" ValidityDurationUs="10"/>
                <SamplingLabel Number="1" Sdi="2" LocalName="L1" ValidityDurationUs="10"/>
            </Bus></ConsumedData></A429>"#;
        let a429: A429 = Directional::parse(&parse_str(source).unwrap(), &mut report).unwrap();

        assert_eq!(report.errors(), 1);
        let kept = a429.consumed.get("B1").unwrap().sampling.get("L1").unwrap();
        assert_eq!(kept.sdi, "0");
    }

    #[test]
    fn test_can_queuing_is_dropped_with_warning() {
        let mut report = Report::new();
        let source = r#"<CAN><ProducedData><Bus Name="C1">
                <SamplingMessage Id="0x10" LocalName="f" MessageSizeBytes="8" ValidityDurationUs="10"/>
                <QueuingMessage Id="0x11"/>
            </Bus></ProducedData></CAN>"#;
        let can: Can = Directional::parse(&parse_str(source).unwrap(), &mut report).unwrap();

        assert_eq!(report.warnings(), 1);
        assert_eq!(report.errors(), 0);
        let bus = can.produced.get("C1").unwrap();
        assert_eq!(bus.sampling.len(), 1);
        assert_eq!(bus.sampling.iter().next().unwrap().id, "0x10");
    }

    #[test]
    fn test_len_and_is_empty_agree() {
        let mut report = Report::new();
        let source = r#"<A429><ProducedData><Bus Name="B1"/></ProducedData></A429>"#;
        let a429: A429 = Directional::parse(&parse_str(source).unwrap(), &mut report).unwrap();

        assert_eq!(a429.produced.len(), 1);
        assert!(!a429.produced.is_empty());
        assert_eq!(a429.consumed.len(), 0);
        assert!(a429.consumed.is_empty());

        let bus = a429.produced.get("B1").unwrap();
        assert_eq!(bus.sampling.len(), 0);
        assert!(bus.sampling.is_empty());
    }

    #[test]
    fn test_empty_family_element() {
        let mut report = Report::new();
        let nad: Nad = Directional::parse(&parse_str("<NAD/>").unwrap(), &mut report).unwrap();
        assert!(nad.is_empty());
        assert!(nad.to_element("NAD").children.is_empty());
    }
}
