//! The per-URL fetch pipeline.
//!
//! normalize → fetch → validate → deduplicate → name → persist. Every stage
//! can end processing of the URL; none of them can abort the batch.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::client::{Fetched, HttpClient};
use super::constants::{DEFAULT_SAVE_DIR, MAX_IMAGE_BYTES, REQUEST_TIMEOUT_SECS};
use super::dedup::{ContentDigest, SeenDigests};
use super::error::{FetchError, SkipReason};
use super::filename::resolve_filename;
use super::persist::persist_image;
use super::url::{NormalizedUrl, normalize_url};
use super::validate::ContentPolicy;

/// Settings for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Directory images are written to (created if missing).
    pub output_dir: PathBuf,
    /// Size ceiling in bytes.
    pub max_bytes: u64,
    /// Total request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            max_bytes: MAX_IMAGE_BYTES,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// An image written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Full path of the written file.
    pub path: PathBuf,
    /// File name within the save directory.
    pub filename: String,
    /// Number of bytes written.
    pub bytes: u64,
    /// SHA-256 of the content.
    pub digest: ContentDigest,
}

/// How processing of one URL ended.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The image was saved.
    Saved(SavedImage),
    /// The image was rejected by policy.
    Skipped(SkipReason),
    /// Fetching or saving failed.
    Failed(FetchError),
}

/// Result of running the pipeline on one URL.
#[derive(Debug)]
pub struct UrlReport {
    /// The normalized URL that was requested.
    pub url: NormalizedUrl,
    /// How processing ended.
    pub outcome: FetchOutcome,
}

impl UrlReport {
    /// True if the request went out over plain HTTP.
    #[must_use]
    pub fn is_insecure(&self) -> bool {
        !self.url.is_secure()
    }
}

/// Runs the fetch pipeline for individual URLs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: HttpClient,
    policy: ContentPolicy,
    output_dir: PathBuf,
}

impl Pipeline {
    /// Creates a pipeline with its own HTTP client.
    #[must_use]
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: HttpClient::with_timeout(config.timeout),
            policy: ContentPolicy::new(config.max_bytes),
            output_dir: config.output_dir.clone(),
        }
    }

    /// Fetches, validates, deduplicates and saves the image at `raw_url`.
    ///
    /// `seen` holds the digests saved earlier in this run; a successful save
    /// adds to it.
    #[instrument(skip(self, seen))]
    pub async fn run(&self, raw_url: &str, seen: &mut SeenDigests) -> UrlReport {
        let url = normalize_url(raw_url);
        if !url.is_secure() {
            warn!(url = %url, "URL is not using HTTPS");
        }
        let outcome = self.process(&url, seen).await;
        match &outcome {
            FetchOutcome::Saved(saved) => {
                info!(url = %url, path = %saved.path.display(), bytes = saved.bytes, "image saved");
            }
            FetchOutcome::Skipped(reason) => {
                warn!(url = %url, ?reason, "image skipped");
            }
            FetchOutcome::Failed(error) => {
                warn!(url = %url, error = %error, "image fetch failed");
            }
        }
        UrlReport { url, outcome }
    }

    async fn process(&self, url: &NormalizedUrl, seen: &mut SeenDigests) -> FetchOutcome {
        let image = match self.client.fetch(url.as_str(), &self.policy).await {
            Ok(Fetched::Image(image)) => image,
            Ok(Fetched::Skipped(reason)) => return FetchOutcome::Skipped(reason),
            Err(error) => return FetchOutcome::Failed(error),
        };

        if !seen.check_and_record(image.digest) {
            debug!(digest = %image.digest, "content already saved in this run");
            return FetchOutcome::Skipped(SkipReason::Duplicate {
                digest: image.digest.to_hex(),
            });
        }

        let filename = resolve_filename(&image.url, &image.content_type);
        debug!(filename = %filename, "resolved filename");

        match persist_image(&self.output_dir, &filename, &image.bytes).await {
            Ok(path) => FetchOutcome::Saved(SavedImage {
                path,
                filename,
                bytes: image.bytes.len() as u64,
                digest: image.digest,
            }),
            Err(error) => {
                seen.forget(&image.digest);
                FetchOutcome::Failed(error)
            }
        }
    }
}
