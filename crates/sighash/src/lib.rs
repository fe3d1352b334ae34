//! Structural fingerprints for Java source trees.
//!
//! The entry point is [`analyze`], which drives a front end
//! ([`sighash_frontend::Frontend`]) through signature construction and
//! produces a [`SignatureTree`]. The tree exposes shallow hashing (declared
//! signatures only) and deep hashing (normalized, closure-expanded body
//! content included); both are pure functions of the tree's contents.
//!
//! Two source trees that differ only in whitespace, comments, formatting or
//! local-variable naming hash identically; any change to declared API shape
//! or, in deep mode, to a resolvable body's normalized shape changes the
//! digest. The intended consumer is a build system deciding whether
//! downstream work can be skipped.

mod analyze;
mod tree;

pub use analyze::{analyze, Analysis, AnalysisNote, AnalyzeOptions, Analyzer};
pub use tree::SignatureTree;

pub use sighash_digest::{DigestSink, HashAlgorithm, StructureDigest};
pub use sighash_frontend::{Frontend, IncludeAll, IncludeFilter, VisibleOrProtected};
pub use sighash_normalize::{NormalizeError, NormalizeOptions};
pub use sighash_signatures::{
    BodySignature, ClassSignature, FieldSignature, MethodSignature, Signature,
};
