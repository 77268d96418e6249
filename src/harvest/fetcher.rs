//! HTTP fetcher implementation
//!
//! This module handles every network request the harvester makes:
//! - Building one HTTP client with the browser header profile
//! - Bounded connect and read timeouts
//! - Classifying the outcome without ever returning an error
//!
//! Callers treat HTTP 200 as success and everything else as failure.

use crate::config::FetchConfig;
use crate::{ConfigError, HarvestError};
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered; the body is returned verbatim whatever the status
    Response {
        /// HTTP status code
        status_code: u16,
        /// Decoded response body
        body: String,
    },

    /// Connect or read timeout elapsed
    Timeout,

    /// Any other transport failure (DNS, refused, reset, TLS, broken body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// HTTP status code, or `None` when no valid response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true only for HTTP 200
    pub fn is_success(&self) -> bool {
        self.status_code() == Some(StatusCode::OK.as_u16())
    }

    /// Response body; empty when no response was received
    pub fn body(&self) -> &str {
        match self {
            Self::Response { body, .. } => body,
            _ => "",
        }
    }
}

/// A source of single, classified network requests
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues one GET request for `url`
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with the configured identity profile
///
/// # Arguments
///
/// * `config` - Header profile, timeouts and certificate policy
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - A header value is not a valid HTTP header, or
///   the TLS backend could not be initialised
pub fn build_http_client(config: &FetchConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, ACCEPT, &config.accept)?;
    insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;
    insert_header(&mut headers, CACHE_CONTROL, &config.cache_control)?;
    insert_header(
        &mut headers,
        UPGRADE_INSECURE_REQUESTS,
        &config.upgrade_insecure_requests,
    )?;

    // Accept-Encoding is negotiated by the gzip/brotli features so bodies
    // arrive decoded
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

fn insert_header(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: &str,
) -> Result<(), HarvestError> {
    if value.is_empty() {
        return Ok(());
    }

    let value = HeaderValue::from_str(value).map_err(|e| {
        ConfigError::Validation(format!("invalid value for header {}: {}", name, e))
    })?;
    headers.insert(name, value);
    Ok(())
}

/// Fetcher backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeouts: Timeouts,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config)?,
            timeouts: Timeouts::from(config),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url, self.timeouts).await
    }
}

/// Waiting limits applied around a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Limit on establishing the connection
    pub connect: Duration,
    /// Longest silence allowed while waiting for the headers or the next body chunk
    pub read: Duration,
}

impl From<&FetchConfig> for Timeouts {
    fn from(config: &FetchConfig) -> Self {
        Self {
            connect: Duration::from_millis(config.connect_timeout_ms),
            read: Duration::from_millis(config.read_timeout_ms),
        }
    }
}

/// Fetches a URL and classifies the outcome
///
/// The read timeout bounds each wait for data, not the whole transfer, so a
/// large listing that keeps arriving is never cut off.
///
/// | Outcome | Result |
/// |---------|--------|
/// | Any HTTP status with a readable body | `Response` |
/// | Connect timeout, or no data for longer than the read timeout | `Timeout` |
/// | DNS, refused, reset, TLS, broken body | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str, timeouts: Timeouts) -> FetchResult {
    let send = client.get(url).send();
    let mut response = match tokio::time::timeout(timeouts.connect + timeouts.read, send).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return classify_error(url, e),
        Err(_) => return timed_out(url),
    };

    let status_code = response.status().as_u16();
    let mut bytes = Vec::new();
    loop {
        match tokio::time::timeout(timeouts.read, response.chunk()).await {
            Ok(Ok(Some(chunk))) => bytes.extend_from_slice(&chunk),
            Ok(Ok(None)) => break,
            Ok(Err(e)) => return classify_error(url, e),
            Err(_) => return timed_out(url),
        }
    }

    if status_code != StatusCode::OK.as_u16() {
        tracing::warn!("{} returned status {}", url, status_code);
    }

    FetchResult::Response {
        status_code,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn timed_out(url: &str) -> FetchResult {
    tracing::warn!("Request to {} timed out", url);
    FetchResult::Timeout
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        timed_out(url)
    } else {
        tracing::warn!("Request to {} failed: {}", url, e);
        FetchResult::NetworkError {
            error: e.to_string(),
        }
    }
}
