//! Constants for the fetch pipeline (timeouts, size ceiling, fallback names).

/// Directory images are saved to when none is given.
pub const DEFAULT_SAVE_DIR: &str = "Fetched_Images";

/// Total request timeout for a single GET (10 seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Largest payload accepted, declared or observed (10 MB).
pub const MAX_IMAGE_BYTES: u64 = 10_000_000;

/// Filename used when the URL path has no basename.
pub const FALLBACK_FILENAME: &str = "downloaded_image";

/// Extension appended when the content type does not map to a known one.
pub const FALLBACK_EXTENSION: &str = ".img";

/// Media-type prefix a response must declare to be accepted.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";
