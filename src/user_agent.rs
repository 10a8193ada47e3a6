//! User-Agent string sent with every image request.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/godsfavour-abrahams/image-fetcher";

/// Default User-Agent for image requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("image-fetcher/{version} (+{PROJECT_UA_URL})")
}
