use crate::markers::{
    CLOSE_METHOD, METHOD_DELIM_1, METHOD_DELIM_2, METHOD_DELIM_3, METHOD_DELIM_4, OPEN_METHOD,
};
use crate::order::{compare_modifier_sets, compare_text_seqs};
use crate::{hash_modifiers, Signature};
use sighash_digest::{DigestSink, Token};
use sighash_frontend::{MethodDeclaration, ModifierSet};
use std::cmp::Ordering;
use std::fmt;

/// Normalized textual trace of one method or constructor body.
///
/// Produced by the body normalizer, owned by exactly one [`MethodSignature`],
/// and contributing to the digest only in deep mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySignature {
    text: String,
}

impl BodySignature {
    pub fn new(text: impl Into<String>) -> Self {
        BodySignature { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Signature for BodySignature {
    fn hash_into(&self, sink: &mut DigestSink, deep: bool) {
        if deep {
            sink.accept(Token::Text(&self.text));
        }
    }
}

/// Canonical representation of one method or constructor.
///
/// Optional collections distinguish "not declared" from "declared empty": a
/// zero-parameter method carries no parameter list at all, which keeps the
/// digest unambiguous.
#[derive(Debug, Clone)]
pub struct MethodSignature {
    name: String,
    return_type: String,
    parameter_types: Option<Vec<String>>,
    thrown_types: Option<Vec<String>>,
    type_param_bounds: Option<Vec<String>>,
    modifiers: ModifierSet,
    body: Option<BodySignature>,
}

impl MethodSignature {
    pub fn from_decl(decl: &MethodDeclaration) -> Self {
        let parameter_types = if decl.parameter_types.is_empty() {
            None
        } else {
            Some(decl.parameter_types.clone())
        };
        let thrown_types = if decl.thrown_types.is_empty() {
            None
        } else {
            let mut thrown = decl.thrown_types.clone();
            thrown.sort();
            thrown.dedup();
            Some(thrown)
        };
        let mut bounds = Vec::new();
        for param in &decl.type_params {
            if param.bounds.is_empty() {
                continue;
            }
            let mut descriptor = String::from(":");
            for bound in &param.bounds {
                descriptor.push_str(bound);
            }
            bounds.push(descriptor);
        }
        MethodSignature {
            name: decl.name.clone(),
            return_type: decl.return_type.clone(),
            parameter_types,
            thrown_types,
            type_param_bounds: if bounds.is_empty() { None } else { Some(bounds) },
            modifiers: decl.modifiers.clone(),
            body: None,
        }
    }

    /// Attach the normalized body. A signature carries at most one body;
    /// attachment happens once, right after normalization.
    pub fn with_body(mut self, body: BodySignature) -> Self {
        self.body = Some(body);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn body(&self) -> Option<&BodySignature> {
        self.body.as_ref()
    }
}

impl Signature for MethodSignature {
    fn hash_into(&self, sink: &mut DigestSink, deep: bool) {
        sink.accept(Token::Marker(OPEN_METHOD));
        hash_modifiers(&self.modifiers, sink);
        sink.accept(Token::Marker(METHOD_DELIM_1));
        sink.accept(Token::Text(&self.name));
        sink.accept(Token::Marker(METHOD_DELIM_1));
        sink.accept(Token::Text(&self.return_type));
        sink.accept(Token::Marker(METHOD_DELIM_2));
        if let Some(bounds) = &self.type_param_bounds {
            sink.accept(Token::TextSeq(bounds));
        }
        sink.accept(Token::Marker(METHOD_DELIM_3));
        if let Some(params) = &self.parameter_types {
            sink.accept(Token::TextSeq(params));
        }
        sink.accept(Token::Marker(METHOD_DELIM_4));
        if let Some(thrown) = &self.thrown_types {
            sink.accept(Token::TextSeq(thrown));
        }
        if deep {
            sink.accept(Token::Text("{"));
            if let Some(body) = &self.body {
                body.hash_into(sink, deep);
            }
            sink.accept(Token::Text("}"));
        }
        sink.accept(Token::Marker(CLOSE_METHOD));
    }
}

impl PartialEq for MethodSignature {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MethodSignature {}

impl PartialOrd for MethodSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MethodSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.return_type.cmp(&other.return_type))
            .then_with(|| {
                compare_text_seqs(self.parameter_types.as_deref(), other.parameter_types.as_deref())
            })
            .then_with(|| {
                compare_text_seqs(self.thrown_types.as_deref(), other.thrown_types.as_deref())
            })
            .then_with(|| {
                compare_text_seqs(
                    self.type_param_bounds.as_deref(),
                    other.type_param_bounds.as_deref(),
                )
            })
            .then_with(|| compare_modifier_sets(&self.modifiers, &other.modifiers))
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{} ", modifier.name().to_ascii_lowercase())?;
        }
        write!(f, "{} {}(", self.return_type, self.name)?;
        if let Some(params) = &self.parameter_types {
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(param)?;
            }
        }
        f.write_str(")")?;
        if let Some(thrown) = &self.thrown_types {
            write!(f, " throws {}", thrown.join(","))?;
        }
        Ok(())
    }
}
