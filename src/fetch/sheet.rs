use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// GET the published sheet and return its CSV text. Non-success statuses are errors.
#[tracing::instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_csv(client: &Client, url: &Url) -> Result<String> {
    let text = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()
        .with_context(|| format!("GET {}", url))?
        .text()
        .await
        .with_context(|| format!("reading body from {}", url))?;

    debug!(bytes = text.len(), "fetched sheet");
    Ok(text)
}
