//! Error and skip types for the fetch pipeline.
//!
//! [`FetchError`] covers failures that stop a single URL (network, HTTP status,
//! write errors). [`SkipReason`] covers policy rejections, which are not errors
//! but still end processing of that URL.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching or saving one image.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to fetch.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The normalized URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// File system error while saving (create directory, create file, write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Creates a network error, promoting reqwest timeouts to [`FetchError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures that happened before anything reached disk.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path, which the source errors do not carry.

/// Why a fetched URL was not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The declared content type does not start with `image/`.
    NotAnImage {
        /// The declared content type, empty if the header was missing.
        content_type: String,
    },
    /// The payload is larger than the configured ceiling.
    TooLarge {
        /// Declared `Content-Length` or the byte count reached while streaming.
        bytes: u64,
        /// The ceiling in bytes.
        limit: u64,
    },
    /// Identical content was already saved in this run.
    Duplicate {
        /// Hex SHA-256 of the payload.
        digest: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage { .. } => f.write_str("Content-Type not image/*"),
            Self::TooLarge { .. } => f.write_str("File too large"),
            Self::Duplicate { .. } => f.write_str("Duplicate image"),
        }
    }
}
