//! Typed views over response fragments.

use crate::error::ParseError;
use crate::parser::{Element, ParseResult};

use std::str::FromStr;

/// A struct that can be read from one response element.
pub trait FromElement: Sized {
    /// Reads the struct from `element`, failing with a `ParseError` when a required field is
    /// missing or malformed.
    fn from_element(element: &Element) -> ParseResult<Self>;

    /// Receives the object id from the enclosing `<result>` when the struct was read from its
    /// `<data>` section. Structs without an id ignore it.
    fn assign_id(&mut self, _id: u32) {}
}

/// The text of a required child.
pub(crate) fn required_text(element: &Element, name: &str) -> ParseResult<String> {
    element.expect_child(name).map(|child| child.text().to_string())
}

/// The text of an optional child.
pub(crate) fn optional_text(element: &Element, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_string)
}

/// Parses the text of a required child.
pub(crate) fn required_value<T: FromStr>(
    element: &Element,
    name: &str,
    for_type: &'static str,
) -> ParseResult<T> {
    let child = element.expect_child(name)?;
    parse_text(child, for_type)
}

/// Parses the text of an optional child. An absent child is `None`, a malformed one an error.
pub(crate) fn optional_value<T: FromStr>(
    element: &Element,
    name: &str,
    for_type: &'static str,
) -> ParseResult<Option<T>> {
    element
        .child(name)
        .map(|child| parse_text(child, for_type))
        .transpose()
}

fn parse_text<T: FromStr>(element: &Element, for_type: &'static str) -> ParseResult<T> {
    element
        .text()
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidValue {
            for_type,
            element: element.name().to_string(),
            found: element.text().to_string(),
        })
}

/// Describes one property of a descriptor: permission, limit or hosting setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    /// The value type the panel expects, e.g. `boolean`, `integer` or `string`.
    pub property_type: String,
    /// Human readable label shown in the panel.
    pub label: String,
}

impl FromElement for PropertyInfo {
    fn from_element(element: &Element) -> ParseResult<Self> {
        Ok(PropertyInfo {
            name: required_text(element, "name")?,
            property_type: required_text(element, "type")?,
            label: optional_text(element, "label").unwrap_or_default(),
        })
    }
}
