use crate::utils::{escape_attribute, escape_xml};
use crate::{Properties, Value};

use std::io::{self, Write};

/// An element of an outgoing packet.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: String,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    /// Creates an empty element named `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Node {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Sets the text content of this element.
    pub fn set_text<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.text = Some(value.into().to_string());
        self
    }

    /// Appends an empty child element and returns it.
    pub fn add_child(&mut self, name: &str) -> &mut Node {
        let index = self.children.len();
        self.children.push(Node::new(name));
        &mut self.children[index]
    }

    /// Appends a child element holding `value` and returns it.
    pub fn add_text_child<V: Into<Value>>(&mut self, name: &str, value: V) -> &mut Node {
        let child = self.add_child(name);
        child.set_text(value);
        child
    }

    /// Appends one child per entry, in insertion order, each holding its value as text.
    pub fn add_properties(&mut self, properties: &Properties) -> &mut Self {
        for (name, value) in properties.iter() {
            self.add_text_child(name, value.clone());
        }
        self
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        if self.text.is_none() && self.children.is_empty() {
            return write!(fmt, "<{}/>", self.name);
        }

        write!(fmt, "<{}>", self.name)?;
        if let Some(ref text) = self.text {
            write!(fmt, "{}", escape_xml(text))?;
        }
        for child in &self.children {
            child.write_as_xml(fmt)?;
        }
        write!(fmt, "</{}>", self.name)
    }
}

/// The XML document sent to the panel for one call.
///
/// A packet is a `<packet>` root element, optionally carrying the protocol version, with the
/// operator element (e.g. `<webspace>`) and its operation beneath.
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    version: Option<String>,
    root: Node,
}

impl Packet {
    /// Creates an empty packet. Without a version, the panel uses its newest protocol.
    pub fn new(version: Option<&str>) -> Self {
        Packet {
            version: version.map(str::to_string),
            root: Node::new("packet"),
        }
    }

    /// Creates a packet from the short request syntax.
    ///
    /// The path is split on `.` into nested element names. Text following the first `=` becomes
    /// the content of the innermost element, so `webspace.del.filter.name=example.com` expands to
    /// `<webspace><del><filter><name>example.com</name></filter></del></webspace>`.
    pub fn from_path(version: Option<&str>, path: &str) -> Self {
        let mut packet = Packet::new(version);
        let (names, value) = match path.find('=') {
            Some(index) => (&path[..index], Some(&path[index + 1..])),
            None => (path, None),
        };

        let mut node = packet.root_mut();
        for name in names.split('.').filter(|name| !name.is_empty()) {
            node = node.add_child(name);
        }
        if let Some(value) = value {
            node.set_text(value);
        }

        packet
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The `<packet>` element.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Returns the name of the operator element and its first operation, for logging.
    pub(crate) fn operation(&self) -> (&str, &str) {
        match self.root.children.first() {
            Some(operator) => (
                operator.name(),
                operator.children.first().map(Node::name).unwrap_or(""),
            ),
            None => ("", ""),
        }
    }

    /// Formats this `Packet` as a UTF-8 encoded XML document.
    ///
    /// # Errors
    ///
    /// Any errors reported by the writer will be propagated to the caller. If the writer never
    /// returns an error, neither will this method.
    pub fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        write!(fmt, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        match self.version {
            Some(ref version) => {
                write!(fmt, r#"<packet version="{}">"#, escape_attribute(version))?
            }
            None => write!(fmt, "<packet>")?,
        }
        for child in &self.root.children {
            child.write_as_xml(fmt)?;
        }
        write!(fmt, "</packet>")?;
        Ok(())
    }

    /// Returns the document as a `String`.
    pub fn to_xml_string(&self) -> String {
        let mut body = Vec::new();
        // Writing to a `Vec<u8>` cannot fail.
        let _ = self.write_as_xml(&mut body);
        String::from_utf8_lossy(&body).into_owned()
    }
}
