//! HTTP fetcher implementation
//!
//! One GET per page. Anything other than a plain `200 OK` is a failure:
//! redirects are not followed and nothing is retried.

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::none()) // a 3xx is reported, not followed
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages below one base address
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    base_url: String,
}

impl PageFetcher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `url` and returns its body
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | DNS, connect, timeout, body read | `Transport` |
    /// | Status other than 200 | `UnexpectedStatus` |
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| self.transport_error(url, source))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("{} answered {}", url, status);
            return Err(ScrapeError::UnexpectedStatus {
                code: status.as_u16(),
                url: url.to_string(),
                base_url: self.base_url.clone(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| self.transport_error(url, source))
    }

    fn transport_error(&self, url: &str, source: reqwest::Error) -> ScrapeError {
        if source.is_timeout() {
            tracing::debug!("Request timeout for {}", url);
        } else if source.is_connect() {
            tracing::debug!("Connection failed for {}", url);
        }
        ScrapeError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
