//! Response parser.
//!
//! The panel answers with a `<packet>` document mirroring the request: the operator element, the
//! operation element and one `<result>` per affected object. The parser reads the complete
//! document into an `Element` tree which the struct parsers then pick apart.

use crate::error::ParseError;

use xml::common::Position;
use xml::reader::{EventReader, XmlEvent};
use xml::ParserConfig;

use std::io::Read;

pub type ParseResult<T> = Result<T, ParseError>;

/// A read-only element of a response document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the concatenated character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over all children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// Follows a chain of child names, taking the first match at each level.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Collects all elements named `name` below this one, in document order.
    ///
    /// This matches what an XPath `//name` query selects.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Like `child`, but reports a missing element as a `ParseError`.
    pub fn expect_child(&self, name: &str) -> ParseResult<&Element> {
        self.child(name).ok_or_else(|| ParseError::MissingElement {
            parent: self.name.clone(),
            expected: name.to_string(),
        })
    }
}

struct Parser<'a, R: Read + 'a> {
    reader: EventReader<&'a mut R>,
}

impl<'a, R: Read> Parser<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Parser {
            reader: EventReader::new_with_config(
                reader,
                ParserConfig {
                    cdata_to_characters: true,
                    ..Default::default()
                },
            ),
        }
    }

    /// Reads an `XmlEvent` from a reader, disposing events we want to ignore.
    fn pull_event(&mut self) -> ParseResult<XmlEvent> {
        loop {
            let event = self.reader.next()?;
            match event {
                XmlEvent::StartDocument { .. }
                | XmlEvent::Comment(_)
                | XmlEvent::Whitespace(_)
                | XmlEvent::ProcessingInstruction { .. } => continue, // skip these
                _ => return Ok(event),
            }
        }
    }

    /// Builds and returns an `Err(UnexpectedXml)`.
    fn expected<T, E: ToString>(&self, expected: E) -> ParseResult<T> {
        Err(ParseError::UnexpectedXml {
            expected: expected.to_string(),
            position: self.reader.position(),
        })
    }

    fn parse_document(&mut self) -> ParseResult<Element> {
        let root = match self.pull_event()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let attributes = attributes
                    .into_iter()
                    .map(|attr| (attr.name.local_name, attr.value))
                    .collect();
                self.parse_element(name.local_name, attributes)?
            }
            _ => return self.expected("root element"),
        };

        match self.pull_event()? {
            XmlEvent::EndDocument => Ok(root),
            _ => self.expected("end of document"),
        }
    }

    /// Reads the content of an element whose start tag was just consumed, up to its end tag.
    fn parse_element(
        &mut self,
        name: String,
        attributes: Vec<(String, String)>,
    ) -> ParseResult<Element> {
        let mut element = Element {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        };

        loop {
            match self.pull_event()? {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => {
                    let attributes = attributes
                        .into_iter()
                        .map(|attr| (attr.name.local_name, attr.value))
                        .collect();
                    let child = self.parse_element(name.local_name, attributes)?;
                    element.children.push(child);
                }
                XmlEvent::Characters(string) | XmlEvent::CData(string) => {
                    element.text.push_str(&string);
                }
                XmlEvent::EndElement { ref name } if name.local_name == element.name => {
                    return Ok(element);
                }
                _ => return self.expected(format!("</{}>", element.name)),
            }
        }
    }
}

/// Parses a response document from an XML reader.
pub fn parse_document<R: Read>(reader: &mut R) -> ParseResult<Element> {
    Parser::new(reader).parse_document()
}
