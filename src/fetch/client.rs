//! HTTP client wrapper for fetching images.
//!
//! This module provides the `HttpClient` struct, which performs a bounded-time
//! GET, applies the [`ContentPolicy`] to the response headers and then streams
//! the body into memory, hashing it as it arrives and aborting as soon as the
//! size ceiling is crossed.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};
use url::Url;

use super::dedup::ContentDigest;
use super::error::{FetchError, SkipReason};
use super::validate::ContentPolicy;
use crate::user_agent;

/// Upper bound on the up-front body buffer; the header is not trusted beyond this.
const INITIAL_BODY_CAPACITY: u64 = 64 * 1024;

/// HTTP client for fetching images.
///
/// Create once and reuse for every URL in a batch so connections are pooled.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// A fully received image body that passed the content policy.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The requested URL.
    pub url: Url,
    /// Declared `Content-Type`.
    pub content_type: String,
    /// Body bytes.
    pub bytes: Vec<u8>,
    /// SHA-256 of `bytes`.
    pub digest: ContentDigest,
}

/// Result of a fetch that reached the server and got a success status.
#[derive(Debug)]
pub enum Fetched {
    /// The body was received and is within policy.
    Image(FetchedImage),
    /// The response was rejected by the content policy.
    Skipped(SkipReason),
}

impl HttpClient {
    /// Creates a client with an explicit total request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches `url` and applies `policy` to headers and body size.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The URL cannot be parsed
    /// - The request fails (network error, timeout)
    /// - The server returns a non-success status
    #[instrument(skip(self, policy), fields(url = %url))]
    pub async fn fetch(&self, url: &str, policy: &ContentPolicy) -> Result<Fetched, FetchError> {
        let parsed_url = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        debug!("sending GET");
        let response = self
            .client
            .get(parsed_url.clone())
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = declared_content_length(&response);
        debug!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            content_length = ?content_length,
            "response headers received"
        );

        if let Err(reason) = policy.check_headers(content_type.as_deref(), content_length) {
            return Ok(Fetched::Skipped(reason));
        }

        let capacity = content_length.map_or(0, |len| {
            usize::try_from(len.min(policy.max_bytes()).min(INITIAL_BODY_CAPACITY)).unwrap_or(0)
        });
        let mut bytes = Vec::with_capacity(capacity);
        let mut hasher = Sha256::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;
            let received = (bytes.len() + chunk.len()) as u64;
            if let Err(reason) = policy.check_size(received) {
                warn!(received, limit = policy.max_bytes(), "body exceeded size ceiling, aborting");
                return Ok(Fetched::Skipped(reason));
            }
            hasher.update(&chunk);
            bytes.extend_from_slice(&chunk);
        }

        let digest = ContentDigest::from_hasher(hasher);
        debug!(bytes = bytes.len(), %digest, "body received");

        Ok(Fetched::Image(FetchedImage {
            url: parsed_url,
            content_type: content_type.unwrap_or_default(),
            bytes,
            digest,
        }))
    }
}

fn declared_content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
