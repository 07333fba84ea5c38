//! Lists the webspaces of a panel.
//!
//! Reads the connection settings from `PLESK_HOST`, `PLESK_LOGIN`/`PLESK_PASSWORD` or
//! `PLESK_SECRET_KEY`, then run `RUST_LOG=debug cargo run --example list-webspaces`.

extern crate env_logger;
extern crate pleskx;

use pleskx::{Client, ClientConfig};

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = ClientConfig::from_env()?.accept_invalid_certs(true);
    let client = Client::new(&config)?;

    for info in client.webspace().get_all()? {
        let usage = match info.id {
            Some(id) => client.webspace().get_disk_usage("id", id)?,
            None => None,
        };
        println!(
            "{:>6} {:<40} {:>12}",
            info.id.map(|id| id.to_string()).unwrap_or_default(),
            info.name,
            usage.map(|usage| usage.httpdocs).unwrap_or(0)
        );
    }

    Ok(())
}
