use crate::markers::{CLOSE_FIELD, FIELD_DELIM_1, FIELD_DELIM_2, OPEN_FIELD};
use crate::{hash_modifiers, Signature};
use sighash_digest::{DigestSink, Token};
use sighash_frontend::{FieldDeclaration, ModifierSet};
use std::cmp::Ordering;
use std::fmt;

/// Canonical representation of one field or enum constant.
///
/// Identity and ordering are defined by (name, type); modifiers participate
/// only in hashing, reduced to visibility and visible finality.
#[derive(Debug, Clone)]
pub struct FieldSignature {
    name: String,
    type_text: String,
    modifiers: ModifierSet,
}

impl FieldSignature {
    pub fn new(
        name: impl Into<String>,
        type_text: impl Into<String>,
        modifiers: ModifierSet,
    ) -> Self {
        FieldSignature {
            name: name.into(),
            type_text: type_text.into(),
            modifiers,
        }
    }

    pub fn from_decl(decl: &FieldDeclaration) -> Self {
        FieldSignature::new(&decl.name, &decl.type_text, decl.modifiers.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_text(&self) -> &str {
        &self.type_text
    }
}

impl Signature for FieldSignature {
    fn hash_into(&self, sink: &mut DigestSink, _deep: bool) {
        sink.accept(Token::Marker(OPEN_FIELD));
        sink.accept(Token::Text(&self.name));
        sink.accept(Token::Marker(FIELD_DELIM_1));
        sink.accept(Token::Text(&self.type_text));
        sink.accept(Token::Marker(FIELD_DELIM_2));
        hash_modifiers(&self.modifiers, sink);
        sink.accept(Token::Marker(CLOSE_FIELD));
    }
}

impl PartialEq for FieldSignature {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldSignature {}

impl PartialOrd for FieldSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.type_text.cmp(&other.type_text))
    }
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{} ", modifier.name().to_ascii_lowercase())?;
        }
        write!(f, "{} {}", self.type_text, self.name)
    }
}
