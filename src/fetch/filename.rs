//! Filename derivation, sanitization and extension repair for saved images.
//!
//! The name comes from the last URL path segment. When that segment has no
//! extension, one is inferred from the declared content type. Existing files
//! with the same name are overwritten; identical content is filtered earlier by
//! the digest check instead.

use std::path::{Component, Path};

use tracing::debug;
use url::Url;

use super::constants::{FALLBACK_EXTENSION, FALLBACK_FILENAME};

/// Builds the on-disk filename for an image fetched from `url`.
///
/// # Examples
///
/// ```
/// use image_fetcher::fetch::resolve_filename;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/pic").unwrap();
/// assert_eq!(resolve_filename(&url, "image/png"), "pic.png");
/// ```
#[must_use]
pub fn resolve_filename(url: &Url, content_type: &str) -> String {
    let base = filename_from_url(url).unwrap_or_else(|| FALLBACK_FILENAME.to_string());
    add_extension_if_missing(base, content_type)
}

/// Last non-empty path segment of `url`, percent-decoded and sanitized.
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
        debug!(
            segment = %last,
            error = %e,
            "URL decoding failed, using raw segment"
        );
        last.into()
    });
    let sanitized = sanitize_filename(&decoded);
    (!sanitized.trim_matches('_').is_empty()).then_some(sanitized)
}

/// Appends an extension inferred from `content_type` when `name` has none.
pub(crate) fn add_extension_if_missing(name: String, content_type: &str) -> String {
    if has_extension(&name) {
        return name;
    }
    let extension = extension_from_content_type(content_type);
    format!("{name}{extension}")
}

/// True when `name` has a dot after any leading dots (`.hidden` has none).
pub(crate) fn has_extension(name: &str) -> bool {
    name.trim_start_matches('.').contains('.')
}

/// Guess an image extension from the Content-Type header.
pub(crate) fn extension_from_content_type(content_type: &str) -> &'static str {
    let mime = content_type.to_ascii_lowercase();
    if mime.contains("jpeg") {
        ".jpg"
    } else if mime.contains("png") {
        ".png"
    } else if mime.contains("gif") {
        ".gif"
    } else {
        FALLBACK_EXTENSION
    }
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
