//! Serializes an [`Element`] tree back to markup.

use super::Element;
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;
use tracing::info;

/// Renders a document, XML declaration included.
///
/// Whitespace is emitted exactly as stored in `text`/`tail`; call
/// [`Element::indent`] first for a human-readable layout.
pub fn to_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.get_mut().push(b'\n');
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner();
    Ok(std::str::from_utf8(&bytes)?.to_owned())
}

/// Writes a document to disk.
pub fn write_file(path: &Path, root: &Element) -> Result<()> {
    info!("Writing file : {}", path.display());
    let rendered = to_string(root)?;
    std::fs::write(path, rendered).map_err(|e| Error::io(path, e))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &element.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }

    if let Some(tail) = &element.tail {
        writer.write_event(Event::Text(BytesText::new(tail)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_indented() {
        let mut root = Element::new("Network");
        let vc = root.push(Element::new("VirtualComponent").with_attribute("Name", "VC1"));
        vc.push(Element::new("Socket").with_attribute("DstIP", "224.226.100.0"));
        root.indent();

        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<Network>\n  <VirtualComponent Name=\"VC1\">\n    <Socket DstIP=\"224.226.100.0\"/>\n  </VirtualComponent>\n</Network>\n";
        assert_eq!(to_string(&root).unwrap(), expected);
    }

    #[test]
    fn test_write_escapes_attribute_values() {
        let root = Element::new("A").with_attribute("Name", "x<y & \"z\"");
        let rendered = to_string(&root).unwrap();
        let reparsed = parse_str(&rendered).unwrap();
        assert_eq!(reparsed.attribute("Name"), Some("x<y & \"z\""));
    }
}
