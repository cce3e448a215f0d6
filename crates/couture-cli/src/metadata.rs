//! Page fetching
//!
//! Loads the HTML of a page to inspect, either from disk or over HTTP.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use tracing::debug;

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Whether the target should be fetched over HTTP
pub fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Load page HTML from a URL or a local file
pub async fn load_page(target: &str) -> Result<String> {
    if is_url(target) {
        fetch_page(target).await
    } else {
        std::fs::read_to_string(target).with_context(|| format!("Failed to read {}", target))
    }
}

/// Fetch a page over HTTP
///
/// Unlike link previews, inspection needs the real page, so non-success
/// statuses are errors.
async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; Couture/1.0)")
        .build()?;

    debug!(url, "Fetching page");
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Fetching {} returned HTTP {}", url, status);
    }

    Ok(response.text().await?)
}
