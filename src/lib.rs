//! A client for the Plesk XML API.
//!
//! The `pleskx` crate sends XML packets to a panel's agent endpoint and reads the responses into
//! plain structs. Every call goes through a [`Client`], which owns a [`Transport`] and hands out
//! operators such as [`Webspace`]:
//!
//! ```no_run
//! use pleskx::{Client, ClientConfig, Properties};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(&ClientConfig::new("panel.example.com").login("admin", "secret"))?;
//!
//! let properties = Properties::new()
//!     .with("name", "example.com")
//!     .with("ip_address", "10.0.0.1")
//!     .with("htype", "vrt_hst");
//! let info = client.webspace().create(&properties, None, Some("Unlimited"))?;
//!
//! println!("created webspace {} ({})", info.id, info.guid);
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/pleskx/0.1.0")]

mod client;
mod config;
mod error;
mod fault;
mod operator;
mod packet;
mod parser;
mod structs;
mod transport;
mod utils;
mod value;
mod webspace;

pub use client::{Client, ResponseMode};
pub use config::{ClientConfig, Credentials, AGENT_PATH, DEFAULT_PORT};
pub use error::{ConfigError, Error, ParseError};
pub use fault::Fault;
pub use operator::{Filter, Operator};
pub use packet::{Node, Packet};
pub use parser::{parse_document, Element, ParseResult};
pub use structs::{FromElement, PropertyInfo};
pub use transport::Transport;
pub use value::{Properties, Value};
pub use webspace::{
    DiskUsage, GeneralInfo, Info, LimitDescriptor, PermissionDescriptor, PhpSettings,
    PhysicalHostingDescriptor, Webspace, WebspaceUpdate,
};

#[cfg(feature = "http")]
pub use transport::http;
