//! Image Fetcher Library
//!
//! Fetches images from user-supplied URLs, checks the declared content type
//! and size, skips content already saved in the same run and writes the rest
//! to a local directory.
//!
//! # Architecture
//!
//! - [`fetch`] - Per-URL pipeline: normalize, fetch, validate, deduplicate, name, persist
//! - [`batch`] - Comma-separated batch driver and status reporting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod fetch;
mod user_agent;

// Re-export commonly used types
pub use batch::{BatchSummary, run_batch, split_urls};
pub use fetch::{
    FetchConfig, FetchError, FetchOutcome, HttpClient, Pipeline, SeenDigests, SkipReason,
    UrlReport, normalize_url,
};
