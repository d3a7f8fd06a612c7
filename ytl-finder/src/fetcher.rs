//! HTTP fetching
//!
//! Every network read goes through the [`Fetcher`] trait so that sources can
//! be exercised against canned pages. Only status 200 counts as success.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Transport-level fetch failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {0} timed out")]
    Timeout(String),

    #[error("connection to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("failed to read body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Raw fetch response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Immutable set of request headers, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders(Vec<(String, String)>);

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    fn to_header_map(&self) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidRequest(format!("header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidRequest(format!("header value for '{}': {}", name.as_str(), e)))?;
            map.append(name, value);
        }
        Ok(map)
    }
}

/// Capability to GET a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`; any status is returned as data, only transport problems are errors
    async fn fetch(&self, url: &Url, headers: &RequestHeaders) -> Result<FetchResponse, TransportError>;
}

/// Fetch `url` and return the body only on HTTP 200
pub async fn fetch_body(
    fetcher: &dyn Fetcher,
    url: &Url,
    headers: &RequestHeaders,
) -> Result<String, TransportError> {
    let response = fetcher.fetch(url, headers).await?;
    if response.status != 200 {
        return Err(TransportError::Status {
            status: response.status,
            url: url.to_string(),
        });
    }
    Ok(response.body)
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, headers: &RequestHeaders) -> Result<FetchResponse, TransportError> {
        debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(url.clone())
            .headers(headers.to_header_map()?)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url = %url, status, bytes = body.len(), "Fetched");
        Ok(FetchResponse { status, body })
    }
}

fn classify_reqwest_error(url: &Url, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else {
        TransportError::Connect {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
