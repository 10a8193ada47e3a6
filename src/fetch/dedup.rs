//! Run-scoped duplicate detection by SHA-256 content digest.

use std::collections::HashSet;
use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Hashes a complete payload.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self::from_output(&Sha256::digest(bytes))
    }

    /// Finishes an incremental hasher.
    #[must_use]
    pub fn from_hasher(hasher: Sha256) -> Self {
        Self::from_output(&hasher.finalize())
    }

    fn from_output(output: &[u8]) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(output);
        Self(digest)
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Digests of everything saved so far in this run.
///
/// Owned by the batch driver and lent to each pipeline invocation.
#[derive(Debug, Default)]
pub struct SeenDigests {
    digests: HashSet<ContentDigest>,
}

impl SeenDigests {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `digest`, returning `false` if it was already present.
    pub fn check_and_record(&mut self, digest: ContentDigest) -> bool {
        self.digests.insert(digest)
    }

    /// Returns true if `digest` has been recorded.
    #[must_use]
    pub fn contains(&self, digest: &ContentDigest) -> bool {
        self.digests.contains(digest)
    }

    /// Forgets `digest`; used when the save that recorded it failed.
    pub fn forget(&mut self, digest: &ContentDigest) {
        self.digests.remove(digest);
    }

    /// Number of distinct digests recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
