//! Raw XML element tree.
//!
//! Introspection documents are small, so they are read into a tree of
//! elements first and interpreted afterwards. Text, comments, processing
//! instructions and the DOCTYPE are dropped.

use crate::error::SchemaError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// An XML element with its attributes and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Gets an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Gets a required attribute value.
    ///
    /// # Errors
    /// Returns `SchemaError::MissingAttribute` if the attribute is absent.
    pub fn required_attr(&self, name: &str) -> Result<&str, SchemaError> {
        self.attr(name)
            .ok_or_else(|| SchemaError::missing_attr(&self.name, name))
    }

    /// Iterates over the child elements with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Reads an XML document into its root element.
///
/// # Errors
/// Returns `SchemaError` if the XML is malformed, has no root element or
/// ends inside an open element.
pub fn read_document(xml: &str) -> Result<Element, SchemaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Ok(Event::End(_)) => {
                let Some(element) = stack.pop() else {
                    return Err(SchemaError::structure("unexpected closing tag"));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SchemaError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    match stack.last() {
        Some(open) => Err(SchemaError::structure(format!(
            "document ends inside <{}>",
            open.name
        ))),
        None => Err(SchemaError::structure("document has no root element")),
    }
}

fn element_from(e: &BytesStart<'_>) -> Result<Element, SchemaError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?;
        attributes.push((key.to_string(), value.into_owned()));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}
