use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Kind of a type declaration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
}

impl DeclKind {
    pub fn name(self) -> &'static str {
        match self {
            DeclKind::Class => "CLASS",
            DeclKind::Interface => "INTERFACE",
            DeclKind::Enum => "ENUM",
            DeclKind::AnnotationType => "ANNOTATION_TYPE",
        }
    }
}

/// Where a type declaration sits relative to other declarations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NestingKind {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

impl NestingKind {
    pub fn name(self) -> &'static str {
        match self {
            NestingKind::TopLevel => "TOP_LEVEL",
            NestingKind::Member => "MEMBER",
            NestingKind::Local => "LOCAL",
            NestingKind::Anonymous => "ANONYMOUS",
        }
    }
}

/// A declared modifier. Ordinal order follows the Java language modifier
/// order, which fixes the iteration order of [`ModifierSet`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Sealed,
    NonSealed,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Public => "PUBLIC",
            Modifier::Protected => "PROTECTED",
            Modifier::Private => "PRIVATE",
            Modifier::Abstract => "ABSTRACT",
            Modifier::Default => "DEFAULT",
            Modifier::Static => "STATIC",
            Modifier::Sealed => "SEALED",
            Modifier::NonSealed => "NON_SEALED",
            Modifier::Final => "FINAL",
            Modifier::Transient => "TRANSIENT",
            Modifier::Volatile => "VOLATILE",
            Modifier::Synchronized => "SYNCHRONIZED",
            Modifier::Native => "NATIVE",
            Modifier::Strictfp => "STRICTFP",
        }
    }
}

/// An ordered set of declared modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierSet(BTreeSet<Modifier>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Modifier> {
        self.0.iter()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        ModifierSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ModifierSet {
    type Item = &'a Modifier;
    type IntoIter = btree_set::Iter<'a, Modifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identity of a resolvable member: enclosing type plus simple name.
///
/// This is the closure key used by deep normalization. Overloads of one name
/// intentionally share a key, matching the coarse granularity of the
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberKey {
    pub type_name: String,
    pub member_name: String,
}

impl MemberKey {
    pub fn new(type_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        MemberKey {
            type_name: type_name.into(),
            member_name: member_name.into(),
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.member_name)
    }
}

/// A declared type parameter with its bound type texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<String>,
}

/// One resolved type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: DeclKind,
    /// Fully qualified name, e.g. `com.example.Outer.Inner`.
    pub qualified_name: String,
    pub nesting: NestingKind,
    /// Textual supertype, e.g. `java.lang.Object`.
    pub superclass: String,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub type_params: Vec<TypeParameter>,
    #[serde(default)]
    pub modifiers: ModifierSet,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
}

/// One enclosed member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    EnumConstant(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(MethodDeclaration),
}

impl MemberDeclaration {
    pub fn name(&self) -> &str {
        match self {
            MemberDeclaration::Field(f) | MemberDeclaration::EnumConstant(f) => &f.name,
            MemberDeclaration::Method(m) | MemberDeclaration::Constructor(m) => &m.name,
        }
    }

    pub fn modifiers(&self) -> &ModifierSet {
        match self {
            MemberDeclaration::Field(f) | MemberDeclaration::EnumConstant(f) => &f.modifiers,
            MemberDeclaration::Method(m) | MemberDeclaration::Constructor(m) => &m.modifiers,
        }
    }
}

/// A field or enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_text: String,
    #[serde(default)]
    pub modifiers: ModifierSet,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub modifiers: ModifierSet,
    /// Parameter types in declaration order.
    #[serde(default)]
    pub parameter_types: Vec<String>,
    #[serde(default)]
    pub thrown_types: Vec<String>,
    #[serde(default)]
    pub type_params: Vec<TypeParameter>,
    /// Resolved body tree, when source is available. Compiler-synthesized
    /// members (e.g. an enum's `values()`) have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<crate::BodyTree>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn modifier_set_iterates_in_declaration_order() {
        let set: ModifierSet = [Modifier::Final, Modifier::Static, Modifier::Public]
            .into_iter()
            .collect();
        let names: Vec<&str> = set.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["PUBLIC", "STATIC", "FINAL"]);
    }

    #[test]
    fn member_key_displays_dotted() {
        let key = MemberKey::new("com.example.Foo", "bar");
        assert_eq!(key.to_string(), "com.example.Foo.bar");
    }

    #[test]
    fn member_declaration_round_trips_through_json() {
        let member = MemberDeclaration::Field(FieldDeclaration {
            name: "x".into(),
            type_text: "int".into(),
            modifiers: [Modifier::Public].into_iter().collect(),
        });
        let json = serde_json::to_string(&member).unwrap();
        let back: MemberDeclaration = serde_json::from_str(&json).unwrap();
        assert_eq!(member, back);
    }
}
