//! Wire text adapter: XML text to [`Element`] trees and back, via quick-xml.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::config::XmlConfig;
use crate::element::Element;
use crate::error::{ProtocolError, ProtocolResult};

/// Parses a complete XML document into its root element.
///
/// Comments, processing instructions and the declaration are skipped. Text
/// and CDATA are unescaped and appended to the enclosing element's text.
pub fn parse_xml(text: &str, config: &XmlConfig) -> ProtocolResult<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(config.trim_text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ProtocolError::Malformed("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(content) => {
                let content = content.unescape()?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&content);
                }
            }
            Event::CData(content) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(std::str::from_utf8(&content)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ProtocolError::Malformed(format!(
            "document ended inside '{}'",
            open.name()
        )));
    }
    root.ok_or_else(|| ProtocolError::Malformed("no root element".to_string()))
}

/// Renders an element as XML text.
///
/// Elements with neither text nor children are written self-closing, so the
/// output for a given tree is always the same.
pub fn to_xml(element: &Element, config: &XmlConfig) -> ProtocolResult<String> {
    let mut writer = match config.indent {
        Some(spaces) => Writer::new_with_indent(Vec::new(), b' ', spaces),
        None => Writer::new(Vec::new()),
    };

    if config.include_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }
    write_element(&mut writer, element)?;

    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).map_err(|e| e.utf8_error())?)
}

fn element_from_start(start: &BytesStart<'_>) -> ProtocolResult<Element> {
    let mut element = Element::new(std::str::from_utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attribute.key.as_ref())?;
        let value = attribute.unescape_value()?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> ProtocolResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(ProtocolError::Malformed(format!(
            "second root element '{}'",
            element.name()
        )));
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> ProtocolResult<()> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.text().is_none() && element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = element.text() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod reading {
        use super::*;

        #[test]
        fn parses_nested_elements() {
            let xml = r#"<?xml version="1.0"?>
                <profiles xmlns="urn:test">
                    <profile id="p1" online="true"><site id="1">name</site></profile>
                    <profile id="p2"/>
                </profiles>"#;
            let root = parse_xml(xml, &XmlConfig::default()).unwrap();

            assert_eq!(root.name(), "profiles");
            assert_eq!(root.attribute("xmlns"), Some("urn:test"));
            assert_eq!(root.text(), None);
            let ids: Vec<&str> = root
                .children_named("profile")
                .filter_map(|p| p.attribute("id"))
                .collect();
            assert_eq!(ids, vec!["p1", "p2"]);
            assert_eq!(root.children()[0].child_text("site"), Some("name"));
        }

        #[test]
        fn unescapes_text_and_attributes() {
            let root = parse_xml(
                r#"<name label="a &amp; b">x &lt; y</name>"#,
                &XmlConfig::default(),
            )
            .unwrap();
            assert_eq!(root.attribute("label"), Some("a & b"));
            assert_eq!(root.text(), Some("x < y"));
        }

        #[test]
        fn cdata_is_text() {
            let root = parse_xml("<v><![CDATA[<raw>]]></v>", &XmlConfig::default()).unwrap();
            assert_eq!(root.text(), Some("<raw>"));
        }

        #[test]
        fn rejects_truncated_documents() {
            let error = parse_xml("<iq><command>", &XmlConfig::default()).unwrap_err();
            assert!(matches!(
                error,
                ProtocolError::Malformed(_) | ProtocolError::Xml(_)
            ));
        }

        #[test]
        fn rejects_empty_documents() {
            let error = parse_xml("   ", &XmlConfig::default()).unwrap_err();
            assert_eq!(error.to_string(), "malformed document: no root element");
        }

        #[test]
        fn rejects_mismatched_tags() {
            let error = parse_xml("<a><b></a>", &XmlConfig::default()).unwrap_err();
            assert!(matches!(error, ProtocolError::Xml(_)));
        }

        #[test]
        fn rejects_two_roots() {
            let error = parse_xml("<a/><b/>", &XmlConfig::default()).unwrap_err();
            assert_eq!(
                error.to_string(),
                "malformed document: second root element 'b'"
            );
        }
    }

    mod writing {
        use super::*;

        fn sample() -> Element {
            Element::new("interests")
                .with_attribute("xmlns", "urn:test")
                .with_child(
                    Element::new("interest")
                        .with_attribute("id", "i1")
                        .with_attribute("default", "true"),
                )
                .with_child(Element::new("label").with_text("a & b"))
        }

        #[test]
        fn compact_output() {
            let xml = to_xml(&sample(), &XmlConfig::default()).unwrap();
            insta::assert_snapshot!(xml, @r#"<interests xmlns="urn:test"><interest id="i1" default="true"/><label>a &amp; b</label></interests>"#);
        }

        #[test]
        fn declaration_is_optional() {
            let xml = to_xml(
                &Element::new("iq"),
                &XmlConfig::default().with_declaration(true),
            )
            .unwrap();
            assert_eq!(xml, r#"<?xml version="1.0" encoding="UTF-8"?><iq/>"#);
        }

        #[test]
        fn indented_output_reads_back_to_the_same_tree() {
            let xml = to_xml(&sample(), &XmlConfig::pretty()).unwrap();
            assert!(xml.contains("\n  <interest"));
            assert_eq!(parse_xml(&xml, &XmlConfig::default()).unwrap(), sample());
        }

        #[test]
        fn compact_output_is_stable() {
            let xml = to_xml(&sample(), &XmlConfig::default()).unwrap();
            let again = to_xml(&parse_xml(&xml, &XmlConfig::default()).unwrap(), &XmlConfig::default())
                .unwrap();
            assert_eq!(xml, again);
        }
    }
}
