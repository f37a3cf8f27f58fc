// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub mod sheet;

pub use sheet::fetch_csv;

/// Build the shared HTTP client used for every fetch cycle.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("buildboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}
