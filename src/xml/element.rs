//! In-memory element tree.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Element is one node of an attribute-bearing markup tree.
///
/// Attribute order is preserved. `text` is the character data before the
/// first child and `tail` the character data after the closing tag, which is
/// where indentation whitespace lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Element>,
    pub text: Option<String>,
    pub tail: Option<String>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Sets an attribute only when a value is present.
    pub fn set_optional(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the value of an attribute the vocabulary requires.
    pub fn required(&self, key: &'static str) -> Result<&str> {
        self.attribute(key)
            .ok_or_else(|| Error::missing_attribute(&self.name, key))
    }

    /// Appends a child and returns a mutable reference to it.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over the children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Iterates mutably over the children with the given name.
    pub fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.children.iter_mut().filter(move |c| c.name == name)
    }

    /// Visits this element and all of its descendants, parents first.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Applies two-space indentation to the whole tree.
    ///
    /// Only whitespace-only `text`/`tail` slots are touched; elements without
    /// children get no inner whitespace, only a normalized tail.
    pub fn indent(&mut self) {
        self.indent_at(0);
    }

    fn indent_at(&mut self, level: usize) {
        let newline = format!("\n{}", "  ".repeat(level));
        if self.children.is_empty() {
            if level > 0 && is_blank(&self.tail) {
                self.tail = Some(newline);
            }
            return;
        }

        if is_blank(&self.text) {
            self.text = Some(format!("{}  ", newline));
        }
        if is_blank(&self.tail) {
            self.tail = Some(newline.clone());
        }
        for child in &mut self.children {
            child.indent_at(level + 1);
        }
        if let Some(last) = self.children.last_mut() {
            if is_blank(&last.tail) {
                last.tail = Some(newline);
            }
        }
    }
}

fn is_blank(slot: &Option<String>) -> bool {
    slot.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Compact one-line rendering used in diagnostics, e.g.
/// `SamplingMessage(Name=M1, MessageSizeBytes=32)`.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_attribute() {
        let el = Element::new("Bus").with_attribute("Name", "B1");
        assert_eq!(el.required("Name").unwrap(), "B1");
        assert!(matches!(
            el.required("Id"),
            Err(Error::MissingAttribute { attribute: "Id", .. })
        ));
    }

    #[test]
    fn test_display_keeps_attribute_order() {
        let el = Element::new("Signal")
            .with_attribute("Name", "S")
            .with_attribute("LocalName", "s");
        assert_eq!(el.to_string(), "Signal(Name=S, LocalName=s)");
    }

    #[test]
    fn test_indent_nested() {
        let mut root = Element::new("A");
        root.push(Element::new("B")).push(Element::new("C"));
        root.push(Element::new("D"));
        root.indent();

        assert_eq!(root.text.as_deref(), Some("\n  "));
        assert_eq!(root.tail.as_deref(), Some("\n"));
        let b = &root.children[0];
        assert_eq!(b.text.as_deref(), Some("\n    "));
        assert_eq!(b.tail.as_deref(), Some("\n  "));
        assert_eq!(b.children[0].tail.as_deref(), Some("\n  "));
        assert_eq!(root.children[1].text, None);
        assert_eq!(root.children[1].tail.as_deref(), Some("\n"));
    }

    #[test]
    fn test_indent_leaves_real_text() {
        let mut root = Element::new("A");
        root.text = Some("payload".to_string());
        root.push(Element::new("B"));
        root.indent();
        assert_eq!(root.text.as_deref(), Some("payload"));
    }
}
