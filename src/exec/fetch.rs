// src/exec/fetch.rs

//! One-shot URL fetch for `type = "url"` commands.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

/// Issue a single GET against `url`. Any HTTP status of 400 or above is an
/// error; the body is only logged.
///
/// No timeout is applied beyond the client's own defaults.
pub async fn fetch_url(client: &Client, url: &str) -> Result<u16> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("calling {url}"))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .with_context(|| format!("reading response body from {url}"))?;

    debug!(url, status, body = %body, "URL response page");
    Ok(status)
}
