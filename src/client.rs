use crate::error::{Error, ParseError, RequestErrorKind};
use crate::parser::{parse_document, Element};
use crate::webspace::Webspace;
use crate::{Fault, Packet, Transport};

use log::{debug, trace, warn};

#[cfg(feature = "http")]
use crate::transport::http::HttpTransport;
#[cfg(feature = "http")]
use crate::ClientConfig;

/// Selects what part of the response document a request returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseMode {
    /// The first `<result>` element of the response.
    Short,
    /// The complete `<packet>` document.
    Full,
}

/// A connection to one panel.
///
/// The client owns a [`Transport`] and the protocol version written into every packet. Operators
/// such as [`Webspace`] borrow the client and build their packets through it.
///
/// [`Transport`]: trait.Transport.html
/// [`Webspace`]: struct.Webspace.html
#[derive(Debug)]
pub struct Client<T> {
    transport: T,
    version: Option<String>,
}

#[cfg(feature = "http")]
impl Client<HttpTransport> {
    /// Creates a client talking HTTP(S) to the panel described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(config)
            .map_err(|err| RequestErrorKind::TransportError(Box::new(err)))?;
        debug!("using panel agent at {}", transport.endpoint());

        Ok(Client {
            transport,
            version: config.version.clone(),
        })
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client that sends its packets through `transport`.
    pub fn with_transport(transport: T, version: Option<&str>) -> Self {
        Client {
            transport,
            version: version.map(str::to_string),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns an empty packet carrying the configured protocol version.
    pub fn packet(&self) -> Packet {
        Packet::new(self.version())
    }

    /// Returns an empty packet for an explicit protocol version.
    pub fn packet_with_version(&self, version: &str) -> Packet {
        Packet::new(Some(version))
    }

    /// Sends `packet` and returns the part of the response selected by `mode`.
    ///
    /// # Errors
    ///
    /// Any errors that occur while sending the packet using the [`Transport`] will be returned to
    /// the caller. Additionally, if the response is malformed, or reports that the operation
    /// failed, an error will also be returned. In short mode, a response without any `<result>`
    /// is a parse error.
    ///
    /// [`Transport`]: trait.Transport.html
    pub fn request(&self, packet: &Packet, mode: ResponseMode) -> Result<Element, Error> {
        let (operator, operation) = packet.operation();
        debug!("sending {}.{} ({:?} response)", operator, operation, mode);
        trace!("request: {}", packet.to_xml_string());

        let mut stream = self
            .transport
            .transmit(packet)
            .map_err(RequestErrorKind::TransportError)?;
        let document = parse_document(&mut stream).map_err(RequestErrorKind::ParseError)?;
        trace!("response: {:?}", document);

        verify_response(&document)?;

        match mode {
            ResponseMode::Full => Ok(document),
            ResponseMode::Short => match document.descendants("result").first() {
                Some(result) => Ok((*result).clone()),
                None => Err(ParseError::MissingElement {
                    parent: document.name().to_string(),
                    expected: "result".to_string(),
                }
                .into()),
            },
        }
    }

    /// Expands a short syntax path such as `webspace.get-limit-descriptor.filter` into a packet
    /// and sends it.
    ///
    /// See [`Packet::from_path`](struct.Packet.html#method.from_path) for the syntax.
    pub fn request_path(&self, path: &str, mode: ResponseMode) -> Result<Element, Error> {
        let packet = Packet::from_path(self.version(), path);
        self.request(&packet, mode)
    }

    /// Returns the webspace (subscription) operator.
    pub fn webspace(&self) -> Webspace<'_, T> {
        Webspace::new(self)
    }
}

/// Turns an error reported inside the response into a `Fault`.
///
/// A failed `<system>` block rejects the whole packet. Otherwise the first `<errcode>` and
/// `<errtext>` of the document describe the failure as soon as any `<status>` reads `error`.
fn verify_response(document: &Element) -> Result<(), Fault> {
    if let Some(system) = document.child("system") {
        if system.child_text("status") == Some("error") {
            return Err(fault(
                system.child_text("errcode"),
                system.child_text("errtext"),
            ));
        }
    }

    let failed = document
        .descendants("status")
        .iter()
        .any(|status| status.text() == "error");
    if failed {
        let code = document.descendants("errcode").into_iter().next().map(Element::text);
        let text = document.descendants("errtext").into_iter().next().map(Element::text);
        if let (Some(code), Some(text)) = (code, text) {
            return Err(fault(Some(code), Some(text)));
        }
    }

    Ok(())
}

fn fault(code: Option<&str>, text: Option<&str>) -> Fault {
    let code = code.and_then(|code| code.trim().parse().ok()).unwrap_or(0);
    let fault = Fault::new(code, text.unwrap_or_default());
    warn!("panel reported an error: {}", fault);
    fault
}
