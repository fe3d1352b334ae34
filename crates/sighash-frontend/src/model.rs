use crate::{
    BodyTree, Frontend, FrontendDiagnostic, MemberDeclaration, MemberKey, SourceLookup,
    TypeDeclaration,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pool {
    Main,
    Dependency,
}

/// In-memory [`Frontend`] over resolved declarations.
///
/// Types come in two pools: main types are fingerprinted and resolvable,
/// dependency types (the classpath) only feed closure resolution. A
/// dependency member without a body behaves exactly like binary-only code:
/// closure expansion stops at its key.
#[derive(Debug, Default, Clone)]
pub struct SourceModel {
    types: Vec<TypeDeclaration>,
    dependency_types: Vec<TypeDeclaration>,
    diagnostics: Vec<FrontendDiagnostic>,
    // First occurrence wins; overloads of one name share a key by design.
    bodies: HashMap<MemberKey, (Pool, usize, usize)>,
}

impl SourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, decl: TypeDeclaration) {
        self.index_bodies(&decl, Pool::Main, self.types.len());
        self.types.push(decl);
    }

    /// Add a classpath type: resolvable for closure expansion, not hashed.
    pub fn add_dependency_type(&mut self, decl: TypeDeclaration) {
        self.index_bodies(&decl, Pool::Dependency, self.dependency_types.len());
        self.dependency_types.push(decl);
    }

    pub fn push_diagnostic(&mut self, diagnostic: FrontendDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn index_bodies(&mut self, decl: &TypeDeclaration, pool: Pool, type_idx: usize) {
        for (member_idx, member) in decl.members.iter().enumerate() {
            let has_body = match member {
                MemberDeclaration::Method(m) | MemberDeclaration::Constructor(m) => {
                    m.body.is_some()
                }
                _ => false,
            };
            if !has_body {
                continue;
            }
            let key = MemberKey::new(decl.qualified_name.clone(), member.name());
            self.bodies
                .entry(key)
                .or_insert((pool, type_idx, member_idx));
        }
    }

    fn body_at(&self, loc: (Pool, usize, usize)) -> Option<&BodyTree> {
        let (pool, type_idx, member_idx) = loc;
        let decl = match pool {
            Pool::Main => self.types.get(type_idx)?,
            Pool::Dependency => self.dependency_types.get(type_idx)?,
        };
        match decl.members.get(member_idx)? {
            MemberDeclaration::Method(m) | MemberDeclaration::Constructor(m) => m.body.as_ref(),
            _ => None,
        }
    }
}

impl Frontend for SourceModel {
    fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    fn member_source(&self, key: &MemberKey) -> SourceLookup<'_> {
        match self.bodies.get(key).and_then(|loc| self.body_at(*loc)) {
            Some(tree) => SourceLookup::Found(tree),
            None => SourceLookup::Unavailable,
        }
    }

    fn diagnostics(&self) -> &[FrontendDiagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BodyNode, BodyTreeBuilder, DeclKind, MethodDeclaration, Modifier, NestingKind, TreeKind,
    };

    fn trivial_body() -> BodyTree {
        let mut builder = BodyTreeBuilder::new();
        let root = builder.push(BodyNode {
            kind: TreeKind::Method,
            children: Vec::new(),
            text: Some("m".into()),
            source_text: None,
            target: None,
        });
        builder.build(root)
    }

    fn type_with_method(name: &str, body: Option<BodyTree>) -> TypeDeclaration {
        TypeDeclaration {
            kind: DeclKind::Class,
            qualified_name: name.to_string(),
            nesting: NestingKind::TopLevel,
            superclass: "java.lang.Object".into(),
            interfaces: Vec::new(),
            type_params: Vec::new(),
            modifiers: [Modifier::Public].into_iter().collect(),
            members: vec![MemberDeclaration::Method(MethodDeclaration {
                name: "m".into(),
                return_type: "void".into(),
                modifiers: [Modifier::Public].into_iter().collect(),
                parameter_types: Vec::new(),
                thrown_types: Vec::new(),
                type_params: Vec::new(),
                body,
            })],
        }
    }

    #[test]
    fn main_member_bodies_resolve() {
        let mut model = SourceModel::new();
        model.add_type(type_with_method("a.A", Some(trivial_body())));
        let key = MemberKey::new("a.A", "m");
        assert!(matches!(model.member_source(&key), SourceLookup::Found(_)));
    }

    #[test]
    fn dependency_types_resolve_but_are_not_enumerated() {
        let mut model = SourceModel::new();
        model.add_dependency_type(type_with_method("dep.D", Some(trivial_body())));
        assert!(model.types().is_empty());
        let key = MemberKey::new("dep.D", "m");
        assert!(matches!(model.member_source(&key), SourceLookup::Found(_)));
    }

    #[test]
    fn bodyless_members_are_unavailable() {
        let mut model = SourceModel::new();
        model.add_type(type_with_method("a.A", None));
        let key = MemberKey::new("a.A", "m");
        assert!(matches!(
            model.member_source(&key),
            SourceLookup::Unavailable
        ));
    }
}
