//! HTTP fetching
//!
//! This module owns all network requests for the crawler: building the shared
//! HTTP client, fetching HTML pages, and fetching images for the download
//! pool. Every fetch is a single attempt; retry policy is deliberately out of
//! scope, so a failed fetch is reported upward and the task is dropped.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// User agent sent with every request
const USER_AGENT: &str = concat!("snapcrawl/", env!("CARGO_PKG_VERSION"));

/// Errors from a single fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct PageContent {
    /// Final URL after redirects; the base for resolving relative links
    pub final_url: Url,

    /// Content-Type header value
    pub content_type: String,

    /// Decoded page body
    pub body: String,
}

/// A successfully fetched image
#[derive(Debug)]
pub struct ImageContent {
    /// Content-Type header value
    pub content_type: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Builds the HTTP client shared by the orchestrator and the download pool
///
/// # Arguments
///
/// * `timeout` - Per-request timeout applied to every fetch
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one HTML page
///
/// A page fetch succeeds only if the response status is 2xx and the declared
/// Content-Type is HTML; anything else is a [`FetchError`].
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The page URL to fetch
///
/// # Returns
///
/// * `Ok(PageContent)` - The decoded page plus its post-redirect URL
/// * `Err(FetchError)` - Classified failure; the caller drops the task
pub async fn fetch_page(client: &Client, url: &Url) -> Result<PageContent, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = header_content_type(&response);
    if !is_html_content_type(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(classify_error)?;

    Ok(PageContent {
        final_url,
        content_type,
        body,
    })
}

/// Fetches one image
///
/// Succeeds only for 2xx responses that declare an `image/*` Content-Type.
pub async fn fetch_image(client: &Client, url: &Url) -> Result<ImageContent, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = header_content_type(&response);
    if !content_type.starts_with("image/") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let bytes = response.bytes().await.map_err(classify_error)?.to_vec();

    Ok(ImageContent {
        content_type,
        bytes,
    })
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::ConnectionFailed("Connection refused".to_string())
    } else {
        FetchError::ConnectionFailed(e.to_string())
    }
}

/// Reads the Content-Type header, lowercased, empty if absent
fn header_content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn is_html_content_type(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn test_html_content_type_detection() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("image/png"));
        assert!(!is_html_content_type(""));
    }

    // Network behavior (status codes, timeouts, content-type gating) is
    // exercised end-to-end against wiremock servers in tests/crawl_tests.rs.
}
