//! Canonical digest sink for signature hashing.
//!
//! A [`DigestSink`] folds a heterogeneous stream of [`Token`]s into a running
//! cryptographic hash and renders the final digest as a URL-safe unpadded
//! base64 string. The encoding is deliberately redundant: every non-marker
//! token contributes a length prefix (for sized tokens), a 32-bit content
//! hash of its string form, and the raw UTF-8 bytes of that form. The length
//! prefix pins token boundaries so that adjacent tokens cannot be reassociated
//! (`"ab" + "c"` must never collide with `"a" + "bc"`).

mod sink;
mod token;

pub use sink::{DigestSink, StructureDigest};
pub use token::Token;

use std::fmt;
use std::str::FromStr;

/// Hash function backing a [`DigestSink`].
///
/// SHA-512 is the historical default for signature hashing; SHA-256 produces
/// shorter digests for callers that prefer them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    Sha256,
    #[default]
    Sha512,
}

impl HashAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for [`HashAlgorithm::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown hash algorithm: {}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}
