//! Contains the values carried by a packet and the ordered property mapping.

use std::fmt::{self, Display, Formatter};

/// A scalar value written as the text of a packet element.
///
/// Values are written using their natural textual form, so an `Int(1000)` is sent as `1000` and a
/// `Double(1.5)` as `1.5`. No other coercion happens.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Arbitrary text.
    String(String),
    /// A signed 64-bit integer.
    Int(i64),
    /// A floating point number.
    Double(f64),
    /// `true` or `false`.
    Bool(bool),
}

impl Value {
    /// Convenience method to access a `Value::String`.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if `self` is a `Value::Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Value::String(ref s) => fmt.write_str(s),
            Value::Int(i) => write!(fmt, "{}", i),
            Value::Double(d) => write!(fmt, "{}", d),
            Value::Bool(b) => fmt.write_str(if b { "true" } else { "false" }),
        }
    }
}

impl From<i32> for Value {
    fn from(other: i32) -> Self {
        Value::Int(other.into())
    }
}

impl From<u32> for Value {
    fn from(other: u32) -> Self {
        Value::Int(other.into())
    }
}

impl From<i64> for Value {
    fn from(other: i64) -> Self {
        Value::Int(other)
    }
}

impl From<bool> for Value {
    fn from(other: bool) -> Self {
        Value::Bool(other)
    }
}

impl From<String> for Value {
    fn from(other: String) -> Self {
        Value::String(other)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(other: &'a str) -> Self {
        Value::String(other.to_string())
    }
}

impl<'a> From<&'a String> for Value {
    fn from(other: &'a String) -> Self {
        Value::String(other.clone())
    }
}

impl From<f64> for Value {
    fn from(other: f64) -> Self {
        Value::Double(other)
    }
}

/// An ordered mapping of element names to values.
///
/// Entries keep their insertion order, which is the order they are written to a packet.
/// Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, Value)>,
}

impl Properties {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Properties { entries: Vec::new() }
    }

    /// Appends `name` with `value` and returns the mapping, for chaining.
    pub fn with<N: Into<String>, V: Into<Value>>(mut self, name: N, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts `name`, replacing and returning the previous value of an existing entry.
    pub fn insert<N: Into<String>, V: Into<Value>>(&mut self, name: N, value: V) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

impl<N: Into<String>, V: Into<Value>, const LEN: usize> From<[(N, V); LEN]> for Properties {
    fn from(entries: [(N, V); LEN]) -> Self {
        entries.into_iter().collect()
    }
}
