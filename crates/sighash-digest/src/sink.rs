use crate::token::{content_hash, Token};
use crate::HashAlgorithm;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;

/// A finished structural digest, rendered as URL-safe unpadded base64.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureDigest(String);

impl StructureDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

enum HashState {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl HashState {
    fn update(&mut self, bytes: &[u8]) {
        match self {
            HashState::Sha256(h) => h.update(bytes),
            HashState::Sha512(h) => h.update(bytes),
        }
    }

    fn finalize(&mut self) -> Vec<u8> {
        match self {
            HashState::Sha256(h) => h.finalize_reset().to_vec(),
            HashState::Sha512(h) => h.finalize_reset().to_vec(),
        }
    }
}

/// Accumulates a canonical token stream into a cryptographic hash.
///
/// `finish` is idempotent; feeding a token after `finish` is a programming
/// error and fails fast with an assertion.
pub struct DigestSink {
    state: HashState,
    finished: Option<StructureDigest>,
}

impl DigestSink {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha256 => HashState::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => HashState::Sha512(Sha512::new()),
        };
        DigestSink {
            state,
            finished: None,
        }
    }

    /// Fold one token into the running hash.
    pub fn accept(&mut self, token: Token<'_>) {
        assert!(
            self.finished.is_none(),
            "token fed into an already-finalized digest sink"
        );
        if let Token::Marker(bytes) = token {
            self.state.update(bytes);
            return;
        }
        if let Some(size) = token.size() {
            if size > 0 {
                let neg = -(size as i64) as i32;
                self.state.update(&neg.to_be_bytes());
            }
        }
        let form = token.stringify();
        self.state.update(&content_hash(&form).to_be_bytes());
        self.state.update(form.as_bytes());
    }

    /// Finalize the hash and return the encoded digest. Repeated calls return
    /// the same digest without touching the hash state again.
    pub fn finish(&mut self) -> &StructureDigest {
        let state = &mut self.state;
        self.finished
            .get_or_insert_with(|| StructureDigest(URL_SAFE_NO_PAD.encode(state.finalize())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn digest_of(tokens: &[Token<'_>], algorithm: HashAlgorithm) -> StructureDigest {
        let mut sink = DigestSink::new(algorithm);
        for token in tokens {
            sink.accept(*token);
        }
        sink.finish().clone()
    }

    #[test]
    fn finish_is_idempotent() {
        let mut sink = DigestSink::new(HashAlgorithm::Sha512);
        sink.accept(Token::Text("hello"));
        let first = sink.finish().clone();
        let second = sink.finish().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn same_stream_same_digest() {
        let tokens = [Token::Text("a"), Token::Symbol {
            name: "CLASS",
            group: "DeclKind",
        }];
        assert_eq!(
            digest_of(&tokens, HashAlgorithm::Sha512),
            digest_of(&tokens, HashAlgorithm::Sha512)
        );
    }

    #[test]
    fn algorithms_produce_distinct_digests() {
        let tokens = [Token::Text("a")];
        assert_ne!(
            digest_of(&tokens, HashAlgorithm::Sha256),
            digest_of(&tokens, HashAlgorithm::Sha512)
        );
    }

    #[test]
    fn length_prefix_defeats_concatenation() {
        let ab_c = [Token::Text("ab"), Token::Text("c")];
        let a_bc = [Token::Text("a"), Token::Text("bc")];
        assert_ne!(
            digest_of(&ab_c, HashAlgorithm::Sha512),
            digest_of(&a_bc, HashAlgorithm::Sha512)
        );
    }

    #[test]
    fn absent_differs_from_empty_sequence() {
        let empty: Vec<String> = Vec::new();
        let with_absent = [Token::Absent];
        let with_empty = [Token::TextSeq(&empty)];
        assert_ne!(
            digest_of(&with_absent, HashAlgorithm::Sha512),
            digest_of(&with_empty, HashAlgorithm::Sha512)
        );
    }

    #[test]
    fn markers_change_the_digest() {
        const MARK: &[u8] = &[0xFF, 0xF3, 0xE2];
        let with = [Token::Marker(MARK), Token::Text("x")];
        let without = [Token::Text("x")];
        assert_ne!(
            digest_of(&with, HashAlgorithm::Sha512),
            digest_of(&without, HashAlgorithm::Sha512)
        );
    }

    #[test]
    #[should_panic(expected = "already-finalized")]
    fn accept_after_finish_panics() {
        let mut sink = DigestSink::new(HashAlgorithm::Sha256);
        sink.accept(Token::Text("a"));
        sink.finish();
        sink.accept(Token::Text("b"));
    }
}
