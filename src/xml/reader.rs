//! Builds an [`Element`] tree from markup text.

use super::Element;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use tracing::info;

/// Parses a complete document and returns its root element.
///
/// Whitespace-only character data is dropped; declarations, comments and
/// processing instructions are ignored.
pub fn parse_str(source: &str) -> Result<Element> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::UnbalancedTag(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let text = text.unescape()?.into_owned();
                append_text(&mut stack, text);
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)?.to_owned();
                append_text(&mut stack, text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(Error::UnbalancedTag(open.name));
    }
    root.ok_or(Error::EmptyDocument)
}

/// Reads and parses a document from disk.
pub fn read_file(path: &Path) -> Result<Element> {
    info!("Reading file : {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_str(&source)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(std::str::from_utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        // Anything after the first root is ignored.
        None if root.is_none() => *root = Some(element),
        None => {}
    }
}

fn append_text(stack: &mut [Element], text: String) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    let slot = match parent.children.last_mut() {
        Some(previous) => &mut previous.tail,
        None => &mut parent.text,
    };
    slot.get_or_insert_with(String::new).push_str(&text);
}
