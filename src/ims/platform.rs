//! Equipment / Application hierarchy and the platform root.

use super::exchange::{merge_optional, DataExchange};
use crate::error::{Error, Result};
use crate::merge::{union_entry, Report, Union};
use crate::xml::Element;
use indexmap::IndexMap;
use tracing::info;

pub const VIRTUAL_COMPONENT: &str = "VirtualComponent";
pub const EQUIPMENT: &str = "Equipment";
pub const APPLICATION: &str = "Application";

/// Application owns its own DataExchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    /// Absent when the application declared no `DataExchange`.
    pub data_exchange: Option<DataExchange>,
}

impl Application {
    /// Reads an `Application` element.
    pub fn parse(element: &Element, report: &mut Report) -> Result<Self> {
        Ok(Application {
            name: element.required("Name")?.to_owned(),
            data_exchange: DataExchange::parse_optional(element, report)?,
        })
    }

    /// Renders the application.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(APPLICATION).with_attribute("Name", self.name.as_str());
        if let Some(exchange) = &self.data_exchange {
            element.push(exchange.to_element());
        }
        element
    }

    /// Merges the DataExchange of a same-named application.
    pub fn merge(&mut self, other: Application, report: &mut Report) {
        info!("Merge of Application '{}'", self.name);
        merge_optional(&mut self.data_exchange, other.data_exchange, report);
    }
}

/// Equipment owns a DataExchange and a keyed collection of Applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub name: String,
    pub data_exchange: Option<DataExchange>,
    pub applications: IndexMap<String, Application>,
}

impl Equipment {
    /// Creates an equipment with nothing declared.
    pub fn new(name: impl Into<String>) -> Self {
        Equipment {
            name: name.into(),
            data_exchange: None,
            applications: IndexMap::new(),
        }
    }

    /// Reads an `Equipment` element.
    pub fn parse(element: &Element, report: &mut Report) -> Result<Self> {
        let mut equipment = Equipment::new(element.required("Name")?);
        equipment.data_exchange = DataExchange::parse_optional(element, report)?;
        for app in element.children_named(APPLICATION) {
            let application = Application::parse(app, report)?;
            equipment.absorb(application, report);
        }
        Ok(equipment)
    }

    /// Renders the equipment: its DataExchange, then its applications.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(EQUIPMENT).with_attribute("Name", self.name.as_str());
        if let Some(exchange) = &self.data_exchange {
            element.push(exchange.to_element());
        }
        for application in self.applications.values() {
            element.push(application.to_element());
        }
        element
    }

    /// Merges a same-named equipment.
    ///
    /// Applications unknown to `self` are added as they are.
    pub fn merge(&mut self, other: Equipment, report: &mut Report) {
        info!("Merge of equipment '{}'", self.name);
        merge_optional(&mut self.data_exchange, other.data_exchange, report);
        for application in other.applications.into_values() {
            self.absorb(application, report);
        }
    }

    fn absorb(&mut self, application: Application, report: &mut Report) {
        let name = application.name.clone();
        match union_entry(&mut self.applications, name, application) {
            Union::Inserted(added) => {
                info!("Application '{}' added to equipment '{}'", added.name, self.name);
            }
            Union::Existing { existing, incoming } => existing.merge(incoming, report),
        }
    }
}

/// Platform is both a parsed document and the accumulated merge result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    /// Root names of the folded documents, in input order.
    pub names: Vec<String>,
    /// Top-level DataExchange, present once any document declared one.
    pub data_exchange: Option<DataExchange>,
    pub equipments: IndexMap<String, Equipment>,
}

impl Platform {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Platform::default()
    }

    /// Reads a document rooted at a `VirtualComponent` element.
    pub fn parse(root: &Element, report: &mut Report) -> Result<Self> {
        if root.name != VIRTUAL_COMPONENT {
            return Err(Error::UnexpectedRoot {
                expected: VIRTUAL_COMPONENT,
                found: root.name.clone(),
            });
        }

        let mut platform = Platform {
            names: vec![root.required("Name")?.to_owned()],
            ..Default::default()
        };
        platform.data_exchange = DataExchange::parse_optional(root, report)?;
        for element in root.children_named(EQUIPMENT) {
            let equipment = Equipment::parse(element, report)?;
            platform.absorb(equipment, report);
        }
        Ok(platform)
    }

    /// Folds a parsed document into this accumulator.
    pub fn merge(&mut self, other: Platform, report: &mut Report) {
        self.names.extend(other.names);

        merge_optional(&mut self.data_exchange, other.data_exchange, report);

        for equipment in other.equipments.into_values() {
            self.absorb(equipment, report);
        }
    }

    fn absorb(&mut self, equipment: Equipment, report: &mut Report) {
        let name = equipment.name.clone();
        if let Union::Existing { existing, incoming } =
            union_entry(&mut self.equipments, name, equipment)
        {
            existing.merge(incoming, report);
        }
    }

    /// Returns the root name: every folded document's name joined by `_`.
    pub fn name(&self) -> String {
        self.names.join("_")
    }

    /// Renders the platform document.
    pub fn to_element(&self) -> Element {
        let mut root = Element::new(VIRTUAL_COMPONENT).with_attribute("Name", self.name());
        if let Some(exchange) = &self.data_exchange {
            root.push(exchange.to_element());
        }
        for equipment in self.equipments.values() {
            root.push(equipment.to_element());
        }
        root
    }
}
