//! Page fetching
//!
//! This module turns a URL into a parsed [`Document`]:
//! - The [`PageFetcher`] trait the crawler and collector are written against
//! - [`HttpFetcher`], the reqwest-backed implementation
//!
//! A failed fetch is reported as a [`FetchError`] value. There are no retries:
//! callers drop the page and keep going.

use crate::config::Config;
use crate::crawler::parser::Document;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};

/// Retrieves a URL and parses it into a [`Document`]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs exactly one retrieval of `url`
    async fn fetch(&self, url: &str) -> FetchResult<Document>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (timeouts and user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use recipe_crawler::config::Config;
/// use recipe_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.crawler.request_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Document> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and parses the body
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Unparseable URL | `InvalidUrl` |
/// | Request timeout | `Timeout` |
/// | Connection / TLS / redirect failure | `Network` |
/// | Non-2xx status | `HttpStatus` |
/// | Content-Type present but not HTML | `ContentMismatch` |
/// | Body could not be read | `Body` |
///
/// Relative links are resolved against the final URL after redirects.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult<Document> {
    tracing::debug!("Fetching {}", url);

    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !is_html_content_type(content_type) {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }
    }

    let final_url = response.url().clone();

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    Ok(Document::parse(&body, &final_url))
}

fn classify_transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}
