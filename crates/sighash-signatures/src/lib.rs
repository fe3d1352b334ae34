//! Canonical signature representations.
//!
//! A signature is an immutable, canonically ordered rendering of one declared
//! construct (field, method, class) that can emit its token stream into a
//! digest sink. Ordering is derived from content, never from declaration or
//! discovery order, so the same declarations always hash identically.

mod class;
mod field;
mod markers;
mod method;
mod order;

pub use class::{ClassSignature, ClassSignatureBuilder};
pub use field::FieldSignature;
pub use method::{BodySignature, MethodSignature};
pub use order::{compare_modifier_sets, compare_text_seqs};

use sighash_digest::{DigestSink, Token};
use sighash_frontend::{Modifier, ModifierSet};

/// Anything that can emit a canonical token stream into a digest sink.
///
/// The `deep` flag controls whether normalized body content participates;
/// shallow streams cover declared shape only.
pub trait Signature {
    fn hash_into(&self, sink: &mut DigestSink, deep: bool);

    fn shallow_hash_into(&self, sink: &mut DigestSink) {
        self.hash_into(sink, false);
    }

    fn deep_hash_into(&self, sink: &mut DigestSink) {
        self.hash_into(sink, true);
    }
}

/// Emit the canonical modifier reduction shared by fields and methods.
///
/// Only visibility is significant, plus finality when the member is visible:
/// a public or protected final member contributes one extra FINAL token,
/// while a private final member contributes none.
fn hash_modifiers(modifiers: &ModifierSet, sink: &mut DigestSink) {
    let mut visible = false;
    for modifier in modifiers {
        match modifier {
            Modifier::Public | Modifier::Protected => {
                visible = true;
                sink.accept(modifier_token(*modifier));
            }
            Modifier::Private => sink.accept(modifier_token(*modifier)),
            _ => {}
        }
    }
    if visible && modifiers.contains(Modifier::Final) {
        sink.accept(modifier_token(Modifier::Final));
    }
}

fn modifier_token(modifier: Modifier) -> Token<'static> {
    Token::Symbol {
        name: modifier.name(),
        group: "Modifier",
    }
}
