//! Filesystem loader for exported declaration models.
//!
//! The hashing core is front-end agnostic; in practice a javac plugin exports
//! resolved declarations and body trees as JSON documents, one per
//! compilation unit. This crate walks directories of those documents and
//! assembles a [`SourceModel`]: source-root documents become main
//! (fingerprinted) types, class-path documents become dependency types that
//! only feed closure resolution.

use serde::Deserialize;
use sighash_frontend::{Frontend, FrontendDiagnostic, SourceModel, TypeDeclaration};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("malformed model document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One exported model document: the resolved types of a compilation unit
/// plus any diagnostics the exporter recorded while processing it.
#[derive(Debug, Deserialize)]
pub struct ModelDocument {
    pub types: Vec<TypeDeclaration>,
    #[serde(default)]
    pub diagnostics: Vec<FrontendDiagnostic>,
}

impl ModelDocument {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Assemble a [`SourceModel`] from exported documents on disk.
///
/// `roots` contribute fingerprinted types; `classpath` entries contribute
/// resolution-only types. Non-JSON files are ignored so the directories can
/// double as ordinary build output trees.
pub fn load_model(roots: &[PathBuf], classpath: &[PathBuf]) -> Result<SourceModel, LoadError> {
    let mut model = SourceModel::new();
    for root in roots {
        for document in documents_under(root)? {
            let document = ModelDocument::from_path(&document)?;
            for decl in document.types {
                model.add_type(decl);
            }
            for diagnostic in document.diagnostics {
                model.push_diagnostic(diagnostic);
            }
        }
    }
    for entry in classpath {
        for document in documents_under(entry)? {
            let document = ModelDocument::from_path(&document)?;
            // Dependency diagnostics are the dependency's problem.
            for decl in document.types {
                model.add_dependency_type(decl);
            }
        }
    }
    tracing::debug!(
        target: "sighash.load",
        types = model.types().len(),
        "model loaded"
    );
    Ok(model)
}

/// All `.json` files under `root`, in stable (sorted) order.
fn documents_under(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new("json")) {
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}
