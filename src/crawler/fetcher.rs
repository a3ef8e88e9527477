//! HTTP fetcher implementation
//!
//! This module handles all outbound requests for the crawler:
//! - Building the shared HTTP client with a browser user agent
//! - Page fetches: search result pages decoded as text
//! - Resource fetches: raw image bytes
//!
//! Both modes collapse every failure (non-success status, timeout, connection
//! error, body read error) into `None`. Retrying is the caller's decision.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

/// Source of result pages and image payloads
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a search result page, returning its body as text
    async fn fetch_page(&self, url: &str) -> Option<String>;

    /// Fetches an image, returning its raw bytes
    async fn fetch_resource(&self, url: &str) -> Option<Vec<u8>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP transport configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use image_spider::config::HttpConfig;
/// use image_spider::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    // Per-request timeouts are applied by the fetch mode; this is the ceiling
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.page_timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    page_timeout: Duration,
    image_timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.page_timeout(),
            config.image_timeout(),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, page_timeout: Duration, image_timeout: Duration) -> Self {
        Self {
            client,
            page_timeout,
            image_timeout,
        }
    }

    /// Sends a GET request, returning the response only for success statuses
    async fn get(&self, url: &str, timeout: Duration) -> Option<Response> {
        match self.client.get(url).timeout(timeout).send().await {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                tracing::warn!(
                    "Request failed with status {}: {}",
                    response.status().as_u16(),
                    url
                );
                None
            }
            Err(e) => {
                tracing::warn!("Request error ({}): {}", classify_error(&e), url);
                tracing::debug!("Request error detail for {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = self.get(url, self.page_timeout).await?;

        // Result pages are UTF-8 regardless of what the headers claim
        match response.bytes().await {
            Ok(body) => Some(String::from_utf8_lossy(&body).into_owned()),
            Err(e) => {
                tracing::warn!("Failed to read page body from {}: {}", url, e);
                None
            }
        }
    }

    async fn fetch_resource(&self, url: &str) -> Option<Vec<u8>> {
        let response = self.get(url, self.image_timeout).await?;

        match response.bytes().await {
            Ok(body) => Some(body.to_vec()),
            Err(e) => {
                tracing::warn!("Failed to read image body from {}: {}", url, e);
                None
            }
        }
    }
}

/// Short label for a transport error, for log lines
fn classify_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_redirect() {
        "redirect error"
    } else if error.is_body() || error.is_decode() {
        "body error"
    } else {
        "transport error"
    }
}
