use crate::markers::{
    CLASS_DELIM, CLASS_DELIM_1, CLASS_DELIM_2, CLASS_DELIM_3, CLOSE_CLASS, OPEN_CLASS,
};
use crate::order::compare_text_seqs;
use crate::{FieldSignature, MethodSignature, Signature};
use sighash_digest::{DigestSink, Token};
use sighash_frontend::{DeclKind, NestingKind, TypeDeclaration};
use std::cmp::Ordering;
use std::fmt;

/// Canonical representation of one type declaration.
///
/// Identity and ordering are defined by the header attributes (name, kind,
/// nesting, supertype, type params, interfaces) alone; member sets
/// participate only in hashing. Two classes with identical headers are
/// indistinguishable to the ordering even if their members differ — a
/// deliberate economy, since members are hashed anyway.
#[derive(Debug, Clone)]
pub struct ClassSignature {
    kind: DeclKind,
    name: String,
    nesting: NestingKind,
    supertype: String,
    type_params: Option<Vec<String>>,
    interfaces: Option<Vec<String>>,
    fields: Vec<FieldSignature>,
    methods: Vec<MethodSignature>,
}

impl ClassSignature {
    /// Start building from a resolved declaration header.
    pub fn builder(decl: &TypeDeclaration) -> ClassSignatureBuilder {
        let type_params = if decl.type_params.is_empty() {
            None
        } else {
            Some(decl.type_params.iter().map(|p| p.name.clone()).collect())
        };
        let interfaces = if decl.interfaces.is_empty() {
            None
        } else {
            Some(decl.interfaces.clone())
        };
        ClassSignatureBuilder {
            kind: decl.kind,
            name: decl.qualified_name.clone(),
            nesting: decl.nesting,
            supertype: decl.superclass.clone(),
            type_params,
            interfaces,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSignature> {
        self.fields.iter()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods.iter()
    }
}

impl Signature for ClassSignature {
    fn hash_into(&self, sink: &mut DigestSink, deep: bool) {
        sink.accept(Token::Marker(OPEN_CLASS));
        sink.accept(Token::Symbol {
            name: self.kind.name(),
            group: "DeclKind",
        });
        sink.accept(Token::Marker(CLASS_DELIM));
        sink.accept(Token::Symbol {
            name: self.nesting.name(),
            group: "NestingKind",
        });
        sink.accept(Token::Marker(CLASS_DELIM));
        sink.accept(Token::Text(&self.name));
        sink.accept(Token::Marker(CLASS_DELIM));
        sink.accept(Token::opt_seq(self.type_params.as_deref()));
        sink.accept(Token::Marker(CLASS_DELIM_1));
        sink.accept(Token::opt_seq(self.interfaces.as_deref()));
        sink.accept(Token::Marker(CLASS_DELIM_2));
        for field in &self.fields {
            field.hash_into(sink, deep);
        }
        sink.accept(Token::Marker(CLASS_DELIM_3));
        for method in &self.methods {
            method.hash_into(sink, deep);
        }
        sink.accept(Token::Marker(CLOSE_CLASS));
    }
}

impl PartialEq for ClassSignature {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ClassSignature {}

impl PartialOrd for ClassSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| (self.kind as u8).cmp(&(other.kind as u8)))
            .then_with(|| (self.nesting as u8).cmp(&(other.nesting as u8)))
            .then_with(|| self.supertype.cmp(&other.supertype))
            .then_with(|| {
                compare_text_seqs(self.type_params.as_deref(), other.type_params.as_deref())
            })
            .then_with(|| compare_text_seqs(self.interfaces.as_deref(), other.interfaces.as_deref()))
    }
}

impl fmt::Display for ClassSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.name().to_ascii_lowercase(), self.name)?;
        if let Some(params) = &self.type_params {
            write!(f, "<{}>", params.join(","))?;
        }
        write!(f, " extends {}", self.supertype)?;
        if let Some(interfaces) = &self.interfaces {
            write!(f, " implements {}", interfaces.join(","))?;
        }
        write!(f, " {}/{}", self.fields.len(), self.methods.len())
    }
}

/// Mutable accumulator for a [`ClassSignature`].
///
/// Members are appended in whatever order the front end yields them; `build`
/// freezes the signature, sorting members and interfaces into canonical
/// order so the result is independent of declaration order.
#[derive(Debug)]
pub struct ClassSignatureBuilder {
    kind: DeclKind,
    name: String,
    nesting: NestingKind,
    supertype: String,
    type_params: Option<Vec<String>>,
    interfaces: Option<Vec<String>>,
    fields: Vec<FieldSignature>,
    methods: Vec<MethodSignature>,
}

impl ClassSignatureBuilder {
    pub fn add_field(&mut self, field: FieldSignature) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: MethodSignature) {
        self.methods.push(method);
    }

    pub fn build(mut self) -> ClassSignature {
        if let Some(interfaces) = &mut self.interfaces {
            interfaces.sort();
        }
        self.fields.sort();
        self.methods.sort();
        ClassSignature {
            kind: self.kind,
            name: self.name,
            nesting: self.nesting,
            supertype: self.supertype,
            type_params: self.type_params,
            interfaces: self.interfaces,
            fields: self.fields,
            methods: self.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sighash_digest::{HashAlgorithm, StructureDigest};
    use sighash_frontend::{FieldDeclaration, MethodDeclaration, Modifier, ModifierSet};

    fn header(name: &str) -> TypeDeclaration {
        TypeDeclaration {
            kind: DeclKind::Class,
            qualified_name: name.to_string(),
            nesting: NestingKind::TopLevel,
            superclass: "java.lang.Object".into(),
            interfaces: Vec::new(),
            type_params: Vec::new(),
            modifiers: [Modifier::Public].into_iter().collect(),
            members: Vec::new(),
        }
    }

    fn field(name: &str, ty: &str) -> FieldSignature {
        FieldSignature::from_decl(&FieldDeclaration {
            name: name.into(),
            type_text: ty.into(),
            modifiers: [Modifier::Public].into_iter().collect(),
        })
    }

    fn method(name: &str) -> MethodSignature {
        MethodSignature::from_decl(&MethodDeclaration {
            name: name.into(),
            return_type: "void".into(),
            modifiers: [Modifier::Public].into_iter().collect(),
            parameter_types: Vec::new(),
            thrown_types: Vec::new(),
            type_params: Vec::new(),
            body: None,
        })
    }

    fn digest(sig: &ClassSignature) -> StructureDigest {
        let mut sink = DigestSink::new(HashAlgorithm::Sha512);
        sig.shallow_hash_into(&mut sink);
        sink.finish().clone()
    }

    #[test]
    fn member_insertion_order_does_not_change_the_hash() {
        let mut forward = ClassSignature::builder(&header("a.A"));
        forward.add_field(field("x", "int"));
        forward.add_field(field("y", "long"));
        forward.add_method(method("m"));
        forward.add_method(method("n"));

        let mut reversed = ClassSignature::builder(&header("a.A"));
        reversed.add_method(method("n"));
        reversed.add_method(method("m"));
        reversed.add_field(field("y", "long"));
        reversed.add_field(field("x", "int"));

        assert_eq!(digest(&forward.build()), digest(&reversed.build()));
    }

    #[test]
    fn interface_order_does_not_change_the_hash() {
        let mut a = header("a.A");
        a.interfaces = vec!["x.I".into(), "x.J".into()];
        let mut b = header("a.A");
        b.interfaces = vec!["x.J".into(), "x.I".into()];
        assert_eq!(
            digest(&ClassSignature::builder(&a).build()),
            digest(&ClassSignature::builder(&b).build())
        );
    }

    #[test]
    fn ordering_ignores_members() {
        let mut with_members = ClassSignature::builder(&header("a.A"));
        with_members.add_field(field("x", "int"));
        let with_members = with_members.build();
        let bare = ClassSignature::builder(&header("a.A")).build();
        assert_eq!(with_members, bare);
        // Hashing still sees the member.
        assert_ne!(digest(&with_members), digest(&bare));
    }

    #[test]
    fn no_type_params_differs_from_declared_type_params() {
        let plain = ClassSignature::builder(&header("a.A")).build();
        let mut generic_header = header("a.A");
        generic_header.type_params = vec![sighash_frontend::TypeParameter {
            name: "T".into(),
            bounds: Vec::new(),
        }];
        let generic = ClassSignature::builder(&generic_header).build();
        assert_ne!(digest(&plain), digest(&generic));
        assert_ne!(plain, generic);
    }

    #[test]
    fn field_modifiers_use_reduced_form() {
        let mut a = ClassSignature::builder(&header("a.A"));
        a.add_field(FieldSignature::new(
            "x",
            "int",
            ModifierSet::from_iter([Modifier::Public, Modifier::Static]),
        ));
        let mut b = ClassSignature::builder(&header("a.A"));
        b.add_field(FieldSignature::new(
            "x",
            "int",
            ModifierSet::from_iter([Modifier::Public]),
        ));
        assert_eq!(digest(&a.build()), digest(&b.build()));
    }
}
