//! Connection settings for a panel.

use crate::error::ConfigError;

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

/// Port the panel's agent endpoint listens on by default.
pub const DEFAULT_PORT: u16 = 8443;

/// Path of the agent endpoint on the panel host.
pub const AGENT_PATH: &str = "/enterprise/control/agent.php";

/// How requests authenticate against the panel.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `HTTP_AUTH_LOGIN` and `HTTP_AUTH_PASSWD` headers.
    Login { login: String, password: String },
    /// A secret key created in the panel, sent as the `KEY` header.
    SecretKey(String),
}

// Passwords and keys stay out of logs.
impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Credentials::Login { ref login, .. } => f
                .debug_struct("Login")
                .field("login", login)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::SecretKey(_) => f.debug_tuple("SecretKey").field(&"<redacted>").finish(),
        }
    }
}

/// Settings used to build a [`Client`](struct.Client.html).
///
/// ```
/// use pleskx::ClientConfig;
///
/// let config = ClientConfig::new("panel.example.com")
///     .login("admin", "secret")
///     .version("1.6.9.1");
///
/// assert_eq!(config.endpoint(), "https://panel.example.com:8443/enterprise/control/agent.php");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) protocol: String,
    pub(crate) credentials: Credentials,
    pub(crate) version: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Creates a configuration for `host` using HTTPS on the default port.
    ///
    /// No credentials are set yet; use [`login`](#method.login) or
    /// [`secret_key`](#method.secret_key).
    pub fn new<S: Into<String>>(host: S) -> Self {
        ClientConfig {
            host: host.into(),
            port: DEFAULT_PORT,
            protocol: "https".to_string(),
            credentials: Credentials::Login {
                login: String::new(),
                password: String::new(),
            },
            version: None,
            timeout: None,
            accept_invalid_certs: false,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the URL scheme, `https` or `http`.
    pub fn protocol<S: Into<String>>(mut self, protocol: S) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn login<L: Into<String>, P: Into<String>>(mut self, login: L, password: P) -> Self {
        self.credentials = Credentials::Login {
            login: login.into(),
            password: password.into(),
        };
        self
    }

    pub fn secret_key<S: Into<String>>(mut self, key: S) -> Self {
        self.credentials = Credentials::SecretKey(key.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the protocol version written to every packet.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Limits how long a single request may take. Without it, the HTTP client's default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accepts self-signed or otherwise invalid TLS certificates.
    ///
    /// Panels often run with the self-signed certificate created at installation. Only has an
    /// effect with the `tls` feature.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// `PLESK_HOST` is required, as is either `PLESK_SECRET_KEY` or `PLESK_LOGIN` and
    /// `PLESK_PASSWORD`. `PLESK_PORT`, `PLESK_PROTOCOL` and `PLESK_VERSION` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("PLESK_HOST")
            .filter(|host| !host.is_empty())
            .ok_or(ConfigError::MissingHost)?;
        let mut config = ClientConfig::new(host);

        config = match (
            lookup("PLESK_SECRET_KEY"),
            lookup("PLESK_LOGIN"),
            lookup("PLESK_PASSWORD"),
        ) {
            (Some(key), _, _) => config.secret_key(key),
            (None, Some(login), Some(password)) => config.login(login, password),
            _ => return Err(ConfigError::MissingCredentials),
        };

        if let Some(port) = lookup("PLESK_PORT") {
            let parsed = port.parse().map_err(|_| ConfigError::InvalidValue {
                setting: "PLESK_PORT".to_string(),
                found: port.clone(),
            })?;
            config = config.port(parsed);
        }
        if let Some(protocol) = lookup("PLESK_PROTOCOL") {
            if protocol != "https" && protocol != "http" {
                return Err(ConfigError::InvalidValue {
                    setting: "PLESK_PROTOCOL".to_string(),
                    found: protocol,
                });
            }
            config = config.protocol(protocol);
        }
        if let Some(version) = lookup("PLESK_VERSION") {
            config = config.version(version);
        }

        Ok(config)
    }

    pub fn host_name(&self) -> &str {
        &self.host
    }

    pub fn protocol_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The URL of the agent endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}{}", self.protocol, self.host, self.port, AGENT_PATH)
    }
}
