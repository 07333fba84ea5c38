use crate::Packet;

use std::error::Error;
use std::io::Read;

/// Packet and response transport abstraction.
///
/// The `Transport` trait provides a way to send a `Packet` to the panel and to receive the
/// corresponding response. A [`Client`] owns one transport and uses it for every call its
/// operators make.
///
/// The most commonly used transport is HTTPS: If the `http` feature is enabled (it is by
/// default), [`http::HttpTransport`] posts packets to the panel's agent endpoint.
///
/// You can implement this trait for your own types if you want to customize how packets are sent,
/// for example to add HTTP headers or to record traffic.
///
/// [`Client`]: struct.Client.html
/// [`http::HttpTransport`]: http/struct.HttpTransport.html
pub trait Transport {
    /// The response stream returned by `transmit`.
    type Stream: Read;

    /// Transmits a packet and returns the panel's response.
    ///
    /// The response is returned as a `Self::Stream` - some type implementing the `Read` trait. The
    /// library will read all of the data and parse it as a response document. It must be UTF-8
    /// encoded XML, otherwise the call will fail.
    ///
    /// # Errors
    ///
    /// If a transport error occurs, it should be returned as a boxed error - the library will then
    /// return an appropriate [`Error`] to the caller.
    ///
    /// [`Error`]: struct.Error.html
    fn transmit(&self, packet: &Packet) -> Result<Self::Stream, Box<dyn Error + Send + Sync>>;
}

impl<'a, T: Transport + ?Sized> Transport for &'a T {
    type Stream = T::Stream;

    fn transmit(&self, packet: &Packet) -> Result<Self::Stream, Box<dyn Error + Send + Sync>> {
        (**self).transmit(packet)
    }
}

/// Provides the HTTP transport and helpers for implementing custom ones using reqwest.
///
/// This module will be disabled if the `http` feature is not enabled.
///
/// The [`HttpTransport`] implementation looks roughly like this:
///
/// ```notrust
/// // serialize packet into `body` (a `Vec<u8>`)
///
/// build_headers(builder, body.len(), credentials);
///
/// // send `body` using `builder` and get response
///
/// check_response(&response)?;
/// ```
///
/// From this, you can build your own custom transports.
///
/// [`HttpTransport`]: struct.HttpTransport.html
#[cfg(feature = "http")]
pub mod http {
    use crate::config::{ClientConfig, Credentials};
    use crate::{Packet, Transport};

    use log::trace;
    use mime::Mime;
    use reqwest::blocking::{Client, RequestBuilder, Response};
    use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};

    use std::error::Error;

    /// Appends all HTTP headers the agent endpoint expects to the `RequestBuilder`.
    ///
    /// More specifically, the following headers are set:
    ///
    /// ```notrust
    /// User-Agent: Rust pleskx
    /// Content-Type: text/xml
    /// Content-Length: $body_len
    /// HTTP_PRETTY_PRINT: TRUE
    /// ```
    ///
    /// followed by either `HTTP_AUTH_LOGIN`/`HTTP_AUTH_PASSWD` or `KEY`, depending on the
    /// credentials.
    pub fn build_headers(
        builder: RequestBuilder,
        body_len: u64,
        credentials: &Credentials,
    ) -> RequestBuilder {
        let builder = builder
            .header(USER_AGENT, "Rust pleskx")
            .header(CONTENT_TYPE, "text/xml")
            .header(CONTENT_LENGTH, body_len)
            .header("HTTP_PRETTY_PRINT", "TRUE");

        match *credentials {
            Credentials::Login {
                ref login,
                ref password,
            } => builder
                .header("HTTP_AUTH_LOGIN", login.as_str())
                .header("HTTP_AUTH_PASSWD", password.as_str()),
            Credentials::SecretKey(ref key) => builder.header("KEY", key.as_str()),
        }
    }

    /// Checks that a reqwest `Response` has a status code indicating success and, if it declares
    /// a content type, that it is `text/xml`.
    pub fn check_response(response: &Response) -> Result<(), Box<dyn Error + Send + Sync>> {
        // This is essentially an open-coded version of `Response::error_for_status` that does not
        // consume the response.
        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(format!("server response indicates error: {}", response.status()).into());
        }

        // (we ignore this if the header is missing completely)
        if let Some(content) = response.headers().get(CONTENT_TYPE) {
            let content = content
                .to_str()
                .map_err(|_| "Content-Type header is not valid UTF-8")?;
            let mime: Mime = content
                .parse()
                .map_err(|_| format!("invalid Content-Type '{}'", content))?;
            match (mime.type_(), mime.subtype()) {
                (mime::TEXT, mime::XML) => {}
                (ty, sub) => {
                    return Err(
                        format!("expected Content-Type 'text/xml', got '{}/{}'", ty, sub).into(),
                    )
                }
            }
        }

        Ok(())
    }

    /// Sends packets to the agent endpoint of one panel.
    #[derive(Debug)]
    pub struct HttpTransport {
        client: Client,
        endpoint: String,
        credentials: Credentials,
    }

    impl HttpTransport {
        /// Creates a transport for the panel described by `config`.
        ///
        /// # Errors
        ///
        /// Fails if reqwest cannot build its client, for example when the TLS backend cannot be
        /// initialized.
        pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
            #[allow(unused_mut)]
            let mut builder = Client::builder();
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
            #[cfg(feature = "tls")]
            {
                builder = builder.danger_accept_invalid_certs(config.accept_invalid_certs);
            }

            Ok(HttpTransport {
                client: builder.build()?,
                endpoint: config.endpoint(),
                credentials: config.credentials.clone(),
            })
        }

        /// The URL packets are posted to.
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    /// The packet is sent as the body of a `POST` request with the headers from `build_headers`.
    impl Transport for HttpTransport {
        type Stream = Response;

        fn transmit(&self, packet: &Packet) -> Result<Self::Stream, Box<dyn Error + Send + Sync>> {
            let mut body = Vec::new();
            packet.write_as_xml(&mut body)?;
            trace!("POST {} ({} bytes)", self.endpoint, body.len());

            let response = build_headers(
                self.client.post(&self.endpoint),
                body.len() as u64,
                &self.credentials,
            )
            .body(body)
            .send()?;

            check_response(&response)?;

            Ok(response)
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use crate::{Packet, Transport};

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::error::Error;
    use std::io::Cursor;

    /// Answers packets with canned responses and records what was sent.
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<VecDeque<String>>,
        sent: RefCell<Vec<Packet>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            MockTransport::default()
        }

        /// Queues a response document.
        pub fn respond(self, xml: &str) -> Self {
            self.responses.borrow_mut().push_back(xml.to_string());
            self
        }

        /// Returns the packets transmitted so far.
        pub fn sent(&self) -> Vec<Packet> {
            self.sent.borrow().clone()
        }

        pub fn last_sent(&self) -> Packet {
            self.sent.borrow().last().cloned().expect("no packet was sent")
        }
    }

    impl Transport for MockTransport {
        type Stream = Cursor<Vec<u8>>;

        fn transmit(&self, packet: &Packet) -> Result<Self::Stream, Box<dyn Error + Send + Sync>> {
            self.sent.borrow_mut().push(packet.clone());
            match self.responses.borrow_mut().pop_front() {
                Some(xml) => Ok(Cursor::new(xml.into_bytes())),
                None => Err("no response queued".into()),
            }
        }
    }
}
