//! Header-based content policy.
//!
//! Decisions rest on the declared `Content-Type` and `Content-Length`; the
//! bytes themselves are not sniffed. The streamed byte count is also checked
//! against the same ceiling so an absent or understated length cannot smuggle
//! an oversized body through.

use super::constants::{IMAGE_MEDIA_PREFIX, MAX_IMAGE_BYTES};
use super::error::SkipReason;

/// Acceptance rules applied to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentPolicy {
    max_bytes: u64,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(MAX_IMAGE_BYTES)
    }
}

impl ContentPolicy {
    /// Creates a policy with the given size ceiling in bytes.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// The size ceiling in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks declared response headers.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::NotAnImage`] when the content type is missing or
    /// not `image/*`, and [`SkipReason::TooLarge`] when the declared length
    /// exceeds the ceiling.
    pub fn check_headers(
        &self,
        content_type: Option<&str>,
        content_length: Option<u64>,
    ) -> Result<(), SkipReason> {
        let content_type = content_type.unwrap_or("").trim();
        if !is_image_content_type(content_type) {
            return Err(SkipReason::NotAnImage {
                content_type: content_type.to_string(),
            });
        }
        if let Some(declared) = content_length {
            self.check_size(declared)?;
        }
        Ok(())
    }

    /// Checks a byte count (declared or received so far) against the ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::TooLarge`] when `bytes` exceeds the ceiling.
    pub fn check_size(&self, bytes: u64) -> Result<(), SkipReason> {
        if bytes > self.max_bytes {
            return Err(SkipReason::TooLarge {
                bytes,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Returns true if `content_type` starts with `image/` (ASCII case-insensitive).
#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..IMAGE_MEDIA_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(IMAGE_MEDIA_PREFIX))
}
