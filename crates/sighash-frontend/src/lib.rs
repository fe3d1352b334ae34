//! Front-end contract for signature hashing.
//!
//! The hashing core does not parse Java itself; it consumes resolved
//! declarations and body trees supplied by a source front end (in practice a
//! javac-side exporter). This crate defines that contract: the declaration
//! model, the body-tree model, the [`Frontend`] trait the core drives, and a
//! reference in-memory implementation ([`SourceModel`]) shared by tests and
//! the JSON loader.

mod decl;
mod model;
mod tree;

pub use decl::{
    DeclKind, FieldDeclaration, MemberDeclaration, MemberKey, MethodDeclaration, Modifier,
    ModifierSet, NestingKind, TypeDeclaration, TypeParameter,
};
pub use model::SourceModel;
pub use tree::{BodyNode, BodyTree, BodyTreeBuilder, NodeId, TreeKind};

/// Result of asking a front end for the source body behind a resolved member.
///
/// `Unavailable` is the closure boundary: the member resolved (e.g. into a
/// binary-only dependency) but no source body is reachable, so closure
/// expansion degrades to an opaque textual tag instead of failing.
#[derive(Debug, Clone, Copy)]
pub enum SourceLookup<'a> {
    Found(&'a BodyTree),
    Unavailable,
}

/// Severity of a diagnostic reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Note,
}

/// A diagnostic produced while the front end analyzed sources.
///
/// Diagnostics are surfaced to the caller but do not abort hashing; partial
/// structural information is still worth fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrontendDiagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The capabilities the hashing core requires from a source front end.
///
/// Tree-position resolution is represented in the body model itself: nodes
/// that refer to a resolvable member carry its [`MemberKey`] as `target`, and
/// `member_source` answers whether source for that member is reachable.
pub trait Frontend {
    /// Resolved type declarations to be fingerprinted, in discovery order.
    /// Order is irrelevant; signatures are canonically sorted downstream.
    fn types(&self) -> &[TypeDeclaration];

    /// Locate the source body of a resolved member, if any is available.
    fn member_source(&self, key: &MemberKey) -> SourceLookup<'_>;

    /// Diagnostics reported while the front end processed its inputs.
    fn diagnostics(&self) -> &[FrontendDiagnostic] {
        &[]
    }
}

/// Policy selecting which types and members participate in the fingerprint.
pub trait IncludeFilter {
    fn includes(&self, modifiers: &ModifierSet) -> bool;
}

/// The default policy: declared public or protected.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibleOrProtected;

impl IncludeFilter for VisibleOrProtected {
    fn includes(&self, modifiers: &ModifierSet) -> bool {
        modifiers.contains(Modifier::Public) || modifiers.contains(Modifier::Protected)
    }
}

/// Include everything, regardless of visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl IncludeFilter for IncludeAll {
    fn includes(&self, _modifiers: &ModifierSet) -> bool {
        true
    }
}

impl<F> IncludeFilter for F
where
    F: Fn(&ModifierSet) -> bool,
{
    fn includes(&self, modifiers: &ModifierSet) -> bool {
        self(modifiers)
    }
}
