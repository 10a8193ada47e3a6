//! Image fetch pipeline: download, validate, deduplicate and save.
//!
//! This module turns one user-supplied URL into at most one file on disk.
//!
//! # Features
//!
//! - Scheme repair (`example.com/a.png` → `https://example.com/a.png`)
//! - Fixed request timeout (10s by default)
//! - Content-Type and Content-Length checks before the body is read
//! - Streaming body with early abort past the size ceiling (10 MB by default)
//! - SHA-256 duplicate detection within one run
//! - Extension repair from the content type (`pic` + `image/png` → `pic.png`)
//!
//! # Example
//!
//! ```no_run
//! use image_fetcher::fetch::{FetchConfig, Pipeline, SeenDigests};
//!
//! # async fn example() {
//! let pipeline = Pipeline::new(&FetchConfig::default());
//! let mut seen = SeenDigests::new();
//! let report = pipeline.run("example.com/cat.png", &mut seen).await;
//! println!("{:?}", report.outcome);
//! # }
//! ```

mod client;
mod constants;
mod dedup;
mod error;
mod filename;
mod persist;
mod pipeline;
mod url;
mod validate;

pub use client::{Fetched, FetchedImage, HttpClient};
pub use constants::{DEFAULT_SAVE_DIR, MAX_IMAGE_BYTES, REQUEST_TIMEOUT_SECS};
pub use dedup::{ContentDigest, SeenDigests};
pub use error::{FetchError, SkipReason};
pub use filename::resolve_filename;
pub use persist::persist_image;
pub use pipeline::{FetchConfig, FetchOutcome, Pipeline, SavedImage, UrlReport};
pub use self::url::{NormalizedUrl, normalize_url};
pub use validate::{ContentPolicy, is_image_content_type};

// Note: no module-local Result alias; signatures spell out `Result<T, FetchError>`.
