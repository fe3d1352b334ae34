use sighash_digest::{DigestSink, HashAlgorithm, StructureDigest};
use sighash_signatures::{ClassSignature, Signature};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// The canonically ordered set of class signatures for one analysis run.
///
/// Classes are ordered by their canonical comparator, never by discovery
/// order; duplicates by full canonical key coalesce. Once populated the tree
/// is read-only, and both hash operations are idempotent.
#[derive(Debug, Default)]
pub struct SignatureTree {
    classes: BTreeSet<ClassSignature>,
}

impl SignatureTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished class signature at its canonical position.
    /// Returns `false` when an identical canonical key was already present.
    pub fn insert(&mut self, class: ClassSignature) -> bool {
        self.classes.insert(class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Canonically ordered, read-only view of the contained classes.
    pub fn iter(&self) -> btree_set::Iter<'_, ClassSignature> {
        self.classes.iter()
    }

    /// Digest over declared signatures only.
    pub fn shallow_hash(&self, algorithm: HashAlgorithm) -> StructureDigest {
        self.hash(algorithm, false)
    }

    /// Digest additionally incorporating normalized body content.
    pub fn deep_hash(&self, algorithm: HashAlgorithm) -> StructureDigest {
        self.hash(algorithm, true)
    }

    pub fn hash(&self, algorithm: HashAlgorithm, deep: bool) -> StructureDigest {
        let mut sink = DigestSink::new(algorithm);
        self.hash_into(&mut sink, deep);
        sink.finish().clone()
    }
}

impl Signature for SignatureTree {
    fn hash_into(&self, sink: &mut DigestSink, deep: bool) {
        for class in &self.classes {
            class.hash_into(sink, deep);
        }
    }
}

impl<'a> IntoIterator for &'a SignatureTree {
    type Item = &'a ClassSignature;
    type IntoIter = btree_set::Iter<'a, ClassSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}
