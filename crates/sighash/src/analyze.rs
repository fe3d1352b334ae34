use crate::SignatureTree;
use sighash_frontend::{
    Frontend, FrontendDiagnostic, IncludeFilter, MemberDeclaration, TypeDeclaration,
};
use sighash_normalize::{normalize_body, NormalizeError, NormalizeOptions};
use sighash_signatures::{BodySignature, ClassSignature, FieldSignature, MethodSignature};

/// Knobs for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub normalize: NormalizeOptions,
}

/// A non-fatal event observed during analysis.
///
/// Front-end diagnostics and failed drill-downs are surfaced here rather than
/// aborting: partial structural information is still worth hashing, since the
/// goal is change detection, not correctness certification.
#[derive(Debug)]
pub enum AnalysisNote {
    Frontend(FrontendDiagnostic),
    /// One body drill-down hit the closure depth ceiling. Reported
    /// distinctly from ordinary resolution failure so operators can tell a
    /// very deep program from a cycle-guard bug. The member keeps its
    /// declared signature but no body.
    DrilldownFailed {
        type_name: String,
        member_name: String,
        error: NormalizeError,
    },
}

/// Outcome of an analysis run: the populated tree plus any notes.
#[derive(Debug)]
pub struct Analysis {
    pub tree: SignatureTree,
    pub notes: Vec<AnalysisNote>,
}

/// Incremental driver: the front end (or a caller with its own discovery
/// loop) feeds type declarations one at a time.
pub struct Analyzer<'f> {
    frontend: &'f dyn Frontend,
    options: AnalyzeOptions,
    tree: SignatureTree,
    notes: Vec<AnalysisNote>,
}

impl<'f> Analyzer<'f> {
    pub fn new(frontend: &'f dyn Frontend, options: AnalyzeOptions) -> Self {
        Analyzer {
            frontend,
            options,
            tree: SignatureTree::new(),
            notes: Vec::new(),
        }
    }

    /// Build and insert the signature of one resolved type declaration, with
    /// `include` selecting the type itself and each of its members.
    ///
    /// Members are visited in whatever order the front end yields them; the
    /// builder sorts them canonically. Body drill-down is attempted for every
    /// qualifying method regardless of the eventual hash mode; a missing body
    /// (e.g. a compiler-synthesized member) is tolerated by omitting the body
    /// signature.
    pub fn add_type(&mut self, decl: &TypeDeclaration, include: &dyn IncludeFilter) {
        if !include.includes(&decl.modifiers) {
            return;
        }
        let mut builder = ClassSignature::builder(decl);
        for member in &decl.members {
            if !include.includes(member.modifiers()) {
                continue;
            }
            match member {
                MemberDeclaration::Field(field) | MemberDeclaration::EnumConstant(field) => {
                    builder.add_field(FieldSignature::from_decl(field));
                }
                MemberDeclaration::Method(method) | MemberDeclaration::Constructor(method) => {
                    let mut signature = MethodSignature::from_decl(method);
                    if let Some(body) = &method.body {
                        match normalize_body(self.frontend, body, &self.options.normalize) {
                            Ok(text) => {
                                signature = signature.with_body(BodySignature::new(text));
                            }
                            Err(error) => {
                                tracing::error!(
                                    target: "sighash.analyze",
                                    type_name = %decl.qualified_name,
                                    member = %method.name,
                                    error = %error,
                                    "body drill-down failed; hashing declared signature only"
                                );
                                self.notes.push(AnalysisNote::DrilldownFailed {
                                    type_name: decl.qualified_name.clone(),
                                    member_name: method.name.clone(),
                                    error,
                                });
                            }
                        }
                    }
                    builder.add_method(signature);
                }
            }
        }
        self.tree.insert(builder.build());
    }

    /// Freeze the tree, folding the front end's own diagnostics into notes.
    pub fn finish(mut self) -> Analysis {
        for diagnostic in self.frontend.diagnostics() {
            self.notes.push(AnalysisNote::Frontend(diagnostic.clone()));
        }
        Analysis {
            tree: self.tree,
            notes: self.notes,
        }
    }
}

/// Analyze every type the front end enumerates.
pub fn analyze(
    frontend: &dyn Frontend,
    include: &dyn IncludeFilter,
    options: AnalyzeOptions,
) -> Analysis {
    let mut analyzer = Analyzer::new(frontend, options);
    for decl in frontend.types() {
        analyzer.add_type(decl, include);
    }
    analyzer.finish()
}
