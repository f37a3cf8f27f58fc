// src/config.rs

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Published CSV export of the project submissions sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT0pHDCYRN4LrKUqKHicgT_oAWaWQpLgK7cybJMb4dl8gMYWQHS44mJCGFF-jjFHPJ9qgLQvzjqkgjz/pub?output=csv";
/// Form for students interested in joining a project.
pub const DEFAULT_JOIN_URL: &str = "https://forms.gle/q2w2pQnM3SrugtV78";
/// Form for proposing a new project.
pub const DEFAULT_PROPOSE_URL: &str = "https://forms.gle/4uEEf1T3A3xGRqzo6";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source and outbound links shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// CSV document to fetch projects from
    #[arg(long, env = "BUILDBOARD_SHEET_URL", default_value = DEFAULT_SHEET_URL)]
    pub sheet_url: String,

    /// "Join a Project" form
    #[arg(long, env = "BUILDBOARD_JOIN_URL", default_value = DEFAULT_JOIN_URL)]
    pub join_url: String,

    /// "Propose a Project" form
    #[arg(long, env = "BUILDBOARD_PROPOSE_URL", default_value = DEFAULT_PROPOSE_URL)]
    pub propose_url: String,

    /// Request timeout for the sheet fetch
    #[arg(long, env = "BUILDBOARD_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sheet_url: Url,
    pub join_url: Url,
    pub propose_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn new(sheet_url: &str, join_url: &str, propose_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            sheet_url: parse_url("sheet", sheet_url)?,
            join_url: parse_url("join form", join_url)?,
            propose_url: parse_url("propose form", propose_url)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl TryFrom<&ConfigArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: &ConfigArgs) -> Result<Self> {
        Config::new(&args.sheet_url, &args.join_url, &args.propose_url, args.timeout_secs)
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Config::new(
            DEFAULT_SHEET_URL,
            DEFAULT_JOIN_URL,
            DEFAULT_PROPOSE_URL,
            DEFAULT_TIMEOUT_SECS,
        )
        .expect("built-in URLs should parse")
    }
}

fn parse_url(what: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("parsing {} URL {:?}", what, raw))
}
