/// One input to a [`DigestSink`](crate::DigestSink).
///
/// The input vocabulary is a closed set of shapes, so it is modeled as an
/// explicit sum type with one encoding rule per variant rather than dynamic
/// inspection of arbitrary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw delimiter bytes, fed into the hash untransformed. Marker constants
    /// are chosen outside the printable ASCII range so no identifier or type
    /// text can forge a structural boundary.
    Marker(&'static [u8]),
    /// Scalar text; trimmed before hashing.
    Text(&'a str),
    /// An enumerated value, rendered as `NAME:Group` so identically named
    /// values from different enumerations stay distinct.
    Symbol {
        name: &'static str,
        group: &'static str,
    },
    /// An ordered sequence of strings, rendered as `[e1 e2 … ]`.
    TextSeq(&'a [String]),
    /// A declared-but-absent value, rendered as the literal `null`. Distinct
    /// from an empty sequence.
    Absent,
}

impl<'a> Token<'a> {
    /// Convenience for optional collections: absent renders as `null`.
    pub fn opt_seq(seq: Option<&'a [String]>) -> Self {
        match seq {
            Some(items) => Token::TextSeq(items),
            None => Token::Absent,
        }
    }

    /// Element count used for the negative length prefix, or `None` for
    /// unsized tokens (symbols, absence). Text counts UTF-16 code units of
    /// the untrimmed input, the same basis as [`content_hash`].
    pub(crate) fn size(&self) -> Option<usize> {
        match self {
            Token::Marker(_) => None,
            Token::Text(s) => Some(s.encode_utf16().count()),
            Token::Symbol { .. } => None,
            Token::TextSeq(items) => Some(items.len()),
            Token::Absent => None,
        }
    }

    /// Stable string form of a non-marker token.
    pub(crate) fn stringify(&self) -> String {
        match self {
            Token::Marker(_) => String::new(),
            Token::Text(s) => s.trim().to_string(),
            Token::Symbol { name, group } => format!("{name}:{group}"),
            Token::TextSeq(items) => {
                let mut out = String::with_capacity(2 + items.len() * 16);
                out.push('[');
                for item in *items {
                    out.push_str(item.trim());
                    out.push(' ');
                }
                out.push(']');
                out
            }
            Token::Absent => "null".to_string(),
        }
    }
}

/// Deterministic 32-bit hash of a string's UTF-16 code units
/// (`h = 31 * h + unit`, wrapping).
///
/// Carried alongside the raw bytes to sharpen avalanche behavior on
/// near-duplicate strings.
pub(crate) fn content_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_is_trimmed_but_size_is_untrimmed() {
        let token = Token::Text("  foo  ");
        assert_eq!(token.stringify(), "foo");
        assert_eq!(token.size(), Some(7));
    }

    #[test]
    fn symbol_renders_name_and_group() {
        let token = Token::Symbol {
            name: "PUBLIC",
            group: "Modifier",
        };
        assert_eq!(token.stringify(), "PUBLIC:Modifier");
        assert_eq!(token.size(), None);
    }

    #[test]
    fn sequences_render_with_trailing_spaces() {
        let items = vec!["int".to_string(), "long".to_string()];
        let token = Token::TextSeq(&items);
        assert_eq!(token.stringify(), "[int long ]");
        assert_eq!(token.size(), Some(2));
    }

    #[test]
    fn empty_sequence_is_distinct_from_absent() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(Token::TextSeq(&empty).stringify(), "[]");
        assert_eq!(Token::TextSeq(&empty).size(), Some(0));
        assert_eq!(Token::Absent.stringify(), "null");
        assert_eq!(Token::Absent.size(), None);
    }

    #[test]
    fn content_hash_matches_reference_values() {
        // Reference values from the JVM's String.hashCode.
        assert_eq!(content_hash(""), 0);
        assert_eq!(content_hash("a"), 97);
        assert_eq!(content_hash("ab"), 3105);
        assert_eq!(content_hash("hello"), 99162322);
    }
}
