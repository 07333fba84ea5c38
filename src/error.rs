//! Defines error types used by this library.

use crate::Fault;

use xml::common::TextPosition;
use xml::reader::Error as XmlError;

use std::error;
use std::fmt::{self, Display, Formatter};

/// Errors that can occur when talking to the panel.
#[derive(Debug)]
pub struct Error(RequestErrorKind);

impl Error {
    /// If this `Error` was caused by the panel rejecting the request, returns the `Fault` it sent.
    pub fn fault(&self) -> Option<&Fault> {
        match self.0 {
            RequestErrorKind::Fault(ref fault) => Some(fault),
            _ => None,
        }
    }

    /// If the response could not be understood, returns the underlying `ParseError`.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self.0 {
            RequestErrorKind::ParseError(ref err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a response, for example because the
    /// connection failed or the server answered with an HTTP error status.
    pub fn is_transport_error(&self) -> bool {
        matches!(self.0, RequestErrorKind::TransportError(_))
    }
}

impl From<RequestErrorKind> for Error {
    fn from(kind: RequestErrorKind) -> Self {
        Error(kind)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error(RequestErrorKind::ParseError(e))
    }
}

impl From<Fault> for Error {
    fn from(f: Fault) -> Self {
        Error(RequestErrorKind::Fault(f))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.0 {
            RequestErrorKind::ParseError(ref err) => Some(err),
            RequestErrorKind::TransportError(ref err) => Some(&**err),
            RequestErrorKind::Fault(ref err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub(crate) enum RequestErrorKind {
    /// The response could not be parsed, or lacked an element a struct requires.
    ParseError(ParseError),

    /// The transport failed to deliver the packet or to receive the response.
    TransportError(Box<dyn error::Error + Send + Sync>),

    /// The panel reported an error in the response body.
    Fault(Fault),
}

impl Display for RequestErrorKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            RequestErrorKind::ParseError(ref err) => write!(fmt, "parse error: {}", err),
            RequestErrorKind::TransportError(ref err) => write!(fmt, "transport error: {}", err),
            RequestErrorKind::Fault(ref err) => write!(fmt, "{}", err),
        }
    }
}

/// Describes possible errors that can occur when reading a response.
#[derive(Debug)]
pub enum ParseError {
    /// Error while parsing (malformed?) XML.
    XmlError(XmlError),

    /// An element a struct requires is absent.
    MissingElement {
        /// Name of the element that was searched.
        parent: String,
        /// Name of the missing child.
        expected: String,
    },

    /// The text of an element could not be converted to the type the struct needs.
    ///
    /// For example, `<id>AAA</id>` describes an invalid id.
    InvalidValue {
        /// The type for which an invalid value was supplied (eg. `integer` or `date`).
        for_type: &'static str,
        /// Name of the element holding the value.
        element: String,
        /// The value we encountered.
        found: String,
    },

    /// Found an unexpected tag, attribute, etc.
    UnexpectedXml {
        /// A short description of the kind of data that was expected.
        expected: String,
        /// The position of the unexpected data inside the XML document.
        position: TextPosition,
    },
}

impl From<XmlError> for ParseError {
    fn from(e: XmlError) -> Self {
        ParseError::XmlError(e)
    }
}

impl Display for ParseError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            ParseError::XmlError(ref err) => write!(fmt, "malformed XML: {}", err),
            ParseError::MissingElement {
                ref parent,
                ref expected,
            } => write!(fmt, "element <{}> has no <{}>", parent, expected),
            ParseError::InvalidValue {
                for_type,
                ref element,
                ref found,
            } => write!(fmt, "invalid value for type '{}' in <{}>: {}", for_type, element, found),
            ParseError::UnexpectedXml {
                ref expected,
                ref position,
            } => write!(fmt, "unexpected XML at {} (expected {})", position, expected),
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ParseError::XmlError(ref err) => Some(err),
            _ => None,
        }
    }
}

/// The client configuration is incomplete or contains an invalid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No host was given.
    MissingHost,
    /// Neither a login nor a secret key was given.
    MissingCredentials,
    /// A setting could not be parsed.
    InvalidValue {
        /// The setting, e.g. the environment variable name.
        setting: String,
        /// The rejected value.
        found: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            ConfigError::MissingHost => fmt.write_str("no panel host configured"),
            ConfigError::MissingCredentials => {
                fmt.write_str("no login/password or secret key configured")
            }
            ConfigError::InvalidValue {
                ref setting,
                ref found,
            } => write!(fmt, "invalid value for {}: {}", setting, found),
        }
    }
}

impl error::Error for ConfigError {}
