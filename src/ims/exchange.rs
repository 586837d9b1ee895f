//! DataExchange: the six family containers of one owner.

use super::protocol::{Afdx, Analogue, Can, Content, Directional, Discrete, Nad, A429};
use super::record::Family;
use crate::error::Result;
use crate::merge::Report;
use crate::xml::Element;

pub const DATA_EXCHANGE: &str = "DataExchange";

/// DataExchange is the fixed tuple of AFDX, A429, CAN, DISCRETE, ANALOGUE
/// and NAD containers, each independently empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataExchange {
    pub afdx: Afdx,
    pub a429: A429,
    pub can: Can,
    pub discrete: Discrete,
    pub analogue: Analogue,
    pub nad: Nad,
}

impl DataExchange {
    /// Reads a `DataExchange` element.
    pub fn parse(element: &Element, report: &mut Report) -> Result<Self> {
        Ok(DataExchange {
            afdx: parse_family(element, Family::Afdx, report)?,
            a429: parse_family(element, Family::A429, report)?,
            can: parse_family(element, Family::Can, report)?,
            discrete: parse_family(element, Family::Discrete, report)?,
            analogue: parse_family(element, Family::Analogue, report)?,
            nad: parse_family(element, Family::Nad, report)?,
        })
    }

    /// Reads and folds every `DataExchange` child of `owner`.
    pub fn parse_children(owner: &Element, report: &mut Report) -> Result<Self> {
        let mut exchange = DataExchange::default();
        for element in owner.children_named(DATA_EXCHANGE) {
            let parsed = DataExchange::parse(element, report)?;
            exchange.merge(parsed, report);
        }
        Ok(exchange)
    }

    /// Like [`DataExchange::parse_children`], but `None` when `owner`
    /// declares no `DataExchange` at all.
    pub fn parse_optional(owner: &Element, report: &mut Report) -> Result<Option<Self>> {
        if owner.child(DATA_EXCHANGE).is_none() {
            return Ok(None);
        }
        DataExchange::parse_children(owner, report).map(Some)
    }

    /// Renders the exchange with families in canonical order, empty ones
    /// omitted.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(DATA_EXCHANGE);
        push_family(&mut element, Family::Afdx, &self.afdx);
        push_family(&mut element, Family::A429, &self.a429);
        push_family(&mut element, Family::Can, &self.can);
        push_family(&mut element, Family::Discrete, &self.discrete);
        push_family(&mut element, Family::Analogue, &self.analogue);
        push_family(&mut element, Family::Nad, &self.nad);
        element
    }

    /// Merges every family of `other` into `self`.
    pub fn merge(&mut self, other: DataExchange, report: &mut Report) {
        self.afdx.merge(other.afdx, report);
        self.a429.merge(other.a429, report);
        self.can.merge(other.can, report);
        self.discrete.merge(other.discrete, report);
        self.analogue.merge(other.analogue, report);
        self.nad.merge(other.nad, report);
    }

    /// Returns true if no family holds anything.
    pub fn is_empty(&self) -> bool {
        self.afdx.is_empty()
            && self.a429.is_empty()
            && self.can.is_empty()
            && self.discrete.is_empty()
            && self.analogue.is_empty()
            && self.nad.is_empty()
    }
}

/// Folds an optional exchange into an optional slot, keeping whichever
/// side declared one.
pub fn merge_optional(
    slot: &mut Option<DataExchange>,
    incoming: Option<DataExchange>,
    report: &mut Report,
) {
    let Some(incoming) = incoming else {
        return;
    };
    match slot.as_mut() {
        Some(exchange) => exchange.merge(incoming, report),
        None => *slot = Some(incoming),
    }
}

fn parse_family<C: Content>(
    element: &Element,
    family: Family,
    report: &mut Report,
) -> Result<Directional<C>> {
    let mut directional: Directional<C> = Directional::default();
    for child in element.children_named(family.tag()) {
        let parsed = Directional::parse(child, report)?;
        directional.merge(parsed, report);
    }
    Ok(directional)
}

fn push_family<C: Content>(parent: &mut Element, family: Family, directional: &Directional<C>) {
    if !directional.is_empty() {
        parent.push(directional.to_element(family.tag()));
    }
}
