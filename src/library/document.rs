//! Typed XML tree for EAGLE library files.
//!
//! The tree keeps exactly what the rewrite needs: element names, ordered
//! attributes, and ordered children. Text is stored in its escaped form so it
//! is written back byte-for-byte; comments, CDATA and processing instructions
//! are carried through as verbatim events.
//!
//! Serialization applies one formatting rule on the tree itself: an element
//! without children is always emitted as `<name .../>`, never as an
//! open/close pair.

use crate::constants::LIBRARY_ROOT_ELEMENT;
use anyhow::{Context, Result, anyhow, bail};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data, kept escaped exactly as read.
    Text(String),
    /// Comments, CDATA sections and processing instructions.
    Verbatim(Event<'static>),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute append.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the attribute `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Element reached by following child indices from this element.
    ///
    /// Each index addresses [`children`](Self::children), not only elements.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &index in path {
            current = match current.children.get_mut(index)? {
                Node::Element(element) => element,
                _ => return None,
            };
        }
        Some(current)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .context("Element name is not valid UTF-8")?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.with_context(|| format!("Malformed attribute on <{name}>"))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .context("Attribute name is not valid UTF-8")?
                .to_string();
            let value = attr
                .unescape_value()
                .with_context(|| format!("Malformed value for attribute '{key}' on <{name}>"))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_attribute(value).into_bytes()),
            });
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(writer)?,
                Node::Text(text) => {
                    writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?;
                }
                Node::Verbatim(event) => writer.write_event(event.borrow())?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// A parsed library file: prolog events plus the root element.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryDocument {
    prolog: Vec<Event<'static>>,
    root: Element,
}

impl LibraryDocument {
    /// Parse XML text into a document.
    ///
    /// Whitespace-only text between elements is dropped; the serializer
    /// re-creates the line structure.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, mismatched tags, a missing root
    /// element, or more than one root element.
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut prolog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .with_context(|| format!("XML error at byte {}", reader.buffer_position()))?;

            match event {
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| anyhow!("Unbalanced closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if text.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    if let Some(parent) = stack.last_mut() {
                        let raw = String::from_utf8(text.into_inner().into_owned())
                            .context("Text content is not valid UTF-8")?;
                        parent.children.push(Node::Text(raw));
                    }
                }
                Event::Eof => break,
                other => match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Verbatim(other.into_owned())),
                    None if root.is_none() => prolog.push(other.into_owned()),
                    // Trailing comments after the root element are dropped.
                    None => {}
                },
            }
        }

        if let Some(open) = stack.last() {
            bail!("Unexpected end of document inside <{}>", open.name);
        }
        let root = root.ok_or_else(|| anyhow!("Document has no root element"))?;

        Ok(Self {
            prolog,
            root,
        })
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Whether the root element is `<eagle>`.
    pub fn is_library(&self) -> bool {
        self.root.name == LIBRARY_ROOT_ELEMENT
    }

    /// Serialize the document to XML text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing an event fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 0);
        for event in &self.prolog {
            writer.write_event(event.borrow())?;
        }
        self.root.write_to(&mut writer)?;

        let mut xml = String::from_utf8(writer.into_inner()).context("Serialized XML is not UTF-8")?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Attribute value escaping that also keeps line breaks and tabs, which a
/// reader would otherwise normalize to spaces.
fn escape_attribute(value: &str) -> String {
    escape(value).replace('\n', "&#10;").replace('\r', "&#13;").replace('\t', "&#9;")
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        bail!("Document has more than one root element (found <{}>)", element.name);
    }
    Ok(())
}
