//! Fixture builders for signature-hashing tests.
//!
//! Declaration models and body trees are tedious to assemble by hand; these
//! builders keep test intent readable. Not intended for production use.

use sighash_frontend::{
    BodyNode, BodyTree, BodyTreeBuilder, DeclKind, FieldDeclaration, MemberDeclaration, MemberKey,
    MethodDeclaration, Modifier, NestingKind, NodeId, SourceModel, TreeKind, TypeDeclaration,
    TypeParameter,
};

/// Recursive node specification, flattened into a [`BodyTree`] arena on build.
#[derive(Debug, Clone)]
pub struct Node {
    kind: TreeKind,
    text: Option<String>,
    source_text: Option<String>,
    target: Option<MemberKey>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(kind: TreeKind) -> Self {
        Node {
            kind,
            text: None,
            source_text: None,
            target: None,
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    pub fn target(mut self, type_name: impl Into<String>, member: impl Into<String>) -> Self {
        self.target = Some(MemberKey::new(type_name, member));
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    fn flatten(self, builder: &mut BodyTreeBuilder) -> NodeId {
        let id = builder.push(BodyNode {
            kind: self.kind,
            children: Vec::new(),
            text: self.text,
            source_text: self.source_text,
            target: self.target,
        });
        let child_ids: Vec<NodeId> = self
            .children
            .into_iter()
            .map(|c| c.flatten(builder))
            .collect();
        builder.set_children(id, child_ids);
        id
    }
}

/// A method body: a METHOD root named `method_name` over a suppressed block
/// of statements.
pub fn body(method_name: &str, statements: impl IntoIterator<Item = Node>) -> BodyTree {
    let root = Node::new(TreeKind::Method)
        .text(method_name)
        .child(Node::new(TreeKind::Block).children(statements));
    let mut builder = BodyTreeBuilder::new();
    let root_id = root.flatten(&mut builder);
    builder.build(root_id)
}

pub fn ret(expr: Node) -> Node {
    Node::new(TreeKind::Return).child(expr)
}

pub fn int_lit(value: i64) -> Node {
    Node::new(TreeKind::IntLiteral).text(value.to_string())
}

pub fn string_lit(value: &str) -> Node {
    Node::new(TreeKind::StringLiteral).text(value)
}

pub fn ident(name: &str) -> Node {
    Node::new(TreeKind::Identifier).text(name)
}

pub fn binary(kind: TreeKind, lhs: Node, rhs: Node) -> Node {
    Node::new(kind).child(lhs).child(rhs)
}

/// An invocation of `name`, resolved to `target_type.target_member`.
pub fn invoke(name: &str, target_type: &str, target_member: &str) -> Node {
    Node::new(TreeKind::MethodInvocation)
        .text(name)
        .target(target_type, target_member)
        .child(ident(name))
}

/// An invocation that the front end could not resolve.
pub fn invoke_unresolved(name: &str, source_text: &str) -> Node {
    Node::new(TreeKind::MethodInvocation)
        .text(name)
        .source_text(source_text)
        .child(ident(name))
}

/// Builder for one [`TypeDeclaration`].
#[derive(Debug)]
pub struct TypeBuilder {
    decl: TypeDeclaration,
}

impl TypeBuilder {
    pub fn new(kind: DeclKind, qualified_name: &str) -> Self {
        TypeBuilder {
            decl: TypeDeclaration {
                kind,
                qualified_name: qualified_name.to_string(),
                nesting: NestingKind::TopLevel,
                superclass: "java.lang.Object".to_string(),
                interfaces: Vec::new(),
                type_params: Vec::new(),
                modifiers: [Modifier::Public].into_iter().collect(),
                members: Vec::new(),
            },
        }
    }

    pub fn class(qualified_name: &str) -> Self {
        Self::new(DeclKind::Class, qualified_name)
    }

    pub fn nesting(mut self, nesting: NestingKind) -> Self {
        self.decl.nesting = nesting;
        self
    }

    pub fn superclass(mut self, name: &str) -> Self {
        self.decl.superclass = name.to_string();
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        self.decl.interfaces.push(name.to_string());
        self
    }

    pub fn type_param(mut self, name: &str, bounds: &[&str]) -> Self {
        self.decl.type_params.push(TypeParameter {
            name: name.to_string(),
            bounds: bounds.iter().map(|b| b.to_string()).collect(),
        });
        self
    }

    pub fn modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.decl.modifiers = modifiers.iter().copied().collect();
        self
    }

    pub fn field(mut self, name: &str, type_text: &str, modifiers: &[Modifier]) -> Self {
        self.decl
            .members
            .push(MemberDeclaration::Field(FieldDeclaration {
                name: name.to_string(),
                type_text: type_text.to_string(),
                modifiers: modifiers.iter().copied().collect(),
            }));
        self
    }

    pub fn enum_constant(mut self, name: &str, type_text: &str) -> Self {
        self.decl
            .members
            .push(MemberDeclaration::EnumConstant(FieldDeclaration {
                name: name.to_string(),
                type_text: type_text.to_string(),
                modifiers: [Modifier::Public, Modifier::Static, Modifier::Final]
                    .into_iter()
                    .collect(),
            }));
        self
    }

    pub fn method(mut self, method: MethodDeclaration) -> Self {
        self.decl.members.push(MemberDeclaration::Method(method));
        self
    }

    pub fn constructor(mut self, method: MethodDeclaration) -> Self {
        self.decl
            .members
            .push(MemberDeclaration::Constructor(method));
        self
    }

    pub fn build(self) -> TypeDeclaration {
        self.decl
    }
}

/// Builder for one [`MethodDeclaration`].
#[derive(Debug)]
pub struct MethodBuilder {
    decl: MethodDeclaration,
}

impl MethodBuilder {
    pub fn new(name: &str, return_type: &str) -> Self {
        MethodBuilder {
            decl: MethodDeclaration {
                name: name.to_string(),
                return_type: return_type.to_string(),
                modifiers: [Modifier::Public].into_iter().collect(),
                parameter_types: Vec::new(),
                thrown_types: Vec::new(),
                type_params: Vec::new(),
                body: None,
            },
        }
    }

    pub fn modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.decl.modifiers = modifiers.iter().copied().collect();
        self
    }

    pub fn params(mut self, types: &[&str]) -> Self {
        self.decl.parameter_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn throws(mut self, types: &[&str]) -> Self {
        self.decl.thrown_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn type_param(mut self, name: &str, bounds: &[&str]) -> Self {
        self.decl.type_params.push(TypeParameter {
            name: name.to_string(),
            bounds: bounds.iter().map(|b| b.to_string()).collect(),
        });
        self
    }

    pub fn body(mut self, body: BodyTree) -> Self {
        self.decl.body = Some(body);
        self
    }

    pub fn build(self) -> MethodDeclaration {
        self.decl
    }
}

/// A [`SourceModel`] over the given main types.
pub fn model(types: impl IntoIterator<Item = TypeDeclaration>) -> SourceModel {
    let mut model = SourceModel::new();
    for decl in types {
        model.add_type(decl);
    }
    model
}
