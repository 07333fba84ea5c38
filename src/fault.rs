use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// An error reported by the panel inside an otherwise well-formed response.
///
/// The panel marks failed operations with `<status>error</status>` and describes them with an
/// `<errcode>` and an `<errtext>` element, either in a `<system>` block (the whole packet was
/// rejected) or next to the failed operation's result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    code: i64,
    message: String,
}

impl Fault {
    /// Creates a new `Fault` from an error code and a message.
    pub fn new<S: Into<String>>(code: i64, message: S) -> Fault {
        Fault {
            code,
            message: message.into(),
        }
    }

    /// Returns the `errcode` sent by the panel.
    ///
    /// The panel documents its codes per operation; `0` is used when the code was not numeric.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Returns the `errtext` sent by the panel.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl Error for Fault {}
