//! URL normalization for user-typed input.

use std::fmt;

use tracing::trace;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// A trimmed URL string that is guaranteed to carry an HTTP(S) scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the scheme is `https://`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        starts_with_ignore_case(&self.0, HTTPS_PREFIX)
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trims `raw` and prepends `https://` unless it already starts with
/// `http://` or `https://` (ASCII case-insensitive).
///
/// Never fails; parsing happens later in the fetcher.
///
/// # Examples
///
/// ```
/// use image_fetcher::fetch::normalize_url;
///
/// assert_eq!(normalize_url("  example.com/pic ").as_str(), "https://example.com/pic");
/// assert_eq!(normalize_url("http://example.com").as_str(), "http://example.com");
/// ```
#[must_use]
pub fn normalize_url(raw: &str) -> NormalizedUrl {
    let trimmed = raw.trim();
    if starts_with_ignore_case(trimmed, HTTP_PREFIX) || starts_with_ignore_case(trimmed, HTTPS_PREFIX)
    {
        return NormalizedUrl(trimmed.to_string());
    }
    trace!(input = %trimmed, "adding https scheme");
    NormalizedUrl(format!("{HTTPS_PREFIX}{trimmed}"))
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_prepends_https_when_missing() {
        assert_eq!(
            normalize_url("example.com/pic.png").as_str(),
            "https://example.com/pic.png"
        );
    }

    #[test]
    fn test_normalize_url_trims_whitespace() {
        assert_eq!(
            normalize_url("\t example.com/a.jpg \n").as_str(),
            "https://example.com/a.jpg"
        );
    }

    #[test]
    fn test_normalize_url_keeps_existing_schemes() {
        assert_eq!(
            normalize_url("https://example.com/a.jpg").as_str(),
            "https://example.com/a.jpg"
        );
        assert_eq!(
            normalize_url("http://example.com/a.jpg").as_str(),
            "http://example.com/a.jpg"
        );
        assert_eq!(
            normalize_url("HTTPS://example.com/a.jpg").as_str(),
            "HTTPS://example.com/a.jpg"
        );
    }

    #[test]
    fn test_normalize_url_is_idempotent() {
        for raw in ["example.com", "http://example.com/x", " https://a.b/c.gif "] {
            let once = normalize_url(raw);
            let twice = normalize_url(once.as_str());
            assert_eq!(once, twice, "normalizing twice changed {raw:?}");
        }
    }

    #[test]
    fn test_normalize_url_other_scheme_gets_https_prefix() {
        assert_eq!(
            normalize_url("ftp://example.com/a.png").as_str(),
            "https://ftp://example.com/a.png"
        );
    }

    #[test]
    fn test_is_secure() {
        assert!(normalize_url("example.com").is_secure());
        assert!(normalize_url("https://example.com").is_secure());
        assert!(!normalize_url("http://example.com").is_secure());
    }

    #[test]
    fn test_normalize_url_non_ascii_input_does_not_panic() {
        assert_eq!(normalize_url("ü").as_str(), "https://ü");
    }
}
