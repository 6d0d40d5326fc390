//! Page fetching.
//!
//! The aggregator only needs "URL in, HTML out, or an error". `HttpFetcher`
//! does that over plain HTTP with browser-like headers; anything else (a
//! headless browser, canned pages in tests) can stand in.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Body fragments served by bot walls instead of the real page.
const BLOCK_MARKERS: [&str; 2] = ["Access denied", "Error 1005"];

/// Source of rendered career pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the page's HTML, or an error if it could not be loaded.
    async fn fetch(&self, url: &Url) -> anyhow::Result<String>;
}

/// Fetches pages over HTTP, presenting itself as a desktop Chrome.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers
}

/// True when the page is a bot-protection wall rather than content.
pub fn is_blocked(body: &str) -> bool {
    BLOCK_MARKERS.iter().any(|marker| body.contains(marker))
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error: {status}");
        }

        let body = response
            .text()
            .await
            .context("failed to read response body")?;
        debug!(bytes = body.len(), "fetched {url}");

        if is_blocked(&body) {
            bail!("Access denied by website");
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_markers() {
        assert!(is_blocked("<h1>Access denied</h1><p>Error 1005</p>"));
        assert!(is_blocked("Cloudflare Error 1005"));
        assert!(!is_blocked("<ul><li>Product Manager</li></ul>"));
    }

    #[test]
    fn test_browser_headers_present() {
        let headers = browser_headers();
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US,en;q=0.9");
        assert_eq!(headers["sec-fetch-mode"], "navigate");
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(5)).is_ok());
    }
}
