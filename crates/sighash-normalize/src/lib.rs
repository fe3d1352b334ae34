//! Body normalization for deep hashing.
//!
//! Turns a resolved method or constructor body into a flat, order-preserving
//! token sequence that ignores whitespace, comments and local-variable names
//! but is sensitive to control-flow shape, literal values, operator kinds and
//! the identity of every resolvable called member. Resolvable call targets
//! are expanded transitively (the closure), with a key-scoped cache and a
//! recursion sentinel guaranteeing termination on cyclic call graphs.

use sighash_frontend::{BodyNode, BodyTree, Frontend, NodeId, SourceLookup, TreeKind};
use std::collections::HashMap;

/// Tunables for one normalization run.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Ceiling on nested closure expansions within one drill-down. The
    /// key-based cycle guard prevents infinite repetition; this bounds
    /// legitimately deep call chains as well.
    pub max_closure_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            max_closure_depth: 128,
        }
    }
}

/// Failure of one body drill-down.
///
/// Ordinary resolution failures are not errors (they degrade to textual
/// tags); this exists so operators can tell a pathological call graph apart
/// from a closure boundary.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("closure depth limit {limit} exceeded while expanding {key}")]
    ClosureDepthExceeded { key: String, limit: usize },
}

/// Normalize one top-level method or constructor body.
///
/// Each call is one drill-down with its own substitution cache; caches are
/// never shared across unrelated top-level normalizations.
pub fn normalize_body(
    frontend: &dyn Frontend,
    body: &BodyTree,
    options: &NormalizeOptions,
) -> Result<String, NormalizeError> {
    let mut walker = Walker {
        frontend,
        subs: HashMap::new(),
        collecting: false,
        depth: 0,
        max_depth: options.max_closure_depth,
    };
    let mut out = String::new();
    walker.scan(body, body.root, &mut out)?;
    Ok(out)
}

struct Walker<'f> {
    frontend: &'f dyn Frontend,
    /// Closure key -> already-computed normalized text (or the recursion
    /// sentinel while that key's expansion is still in progress).
    subs: HashMap<String, String>,
    /// Whether bare identifiers are currently meaningful (inside a
    /// member-select or member-reference expression).
    collecting: bool,
    depth: usize,
    max_depth: usize,
}

impl<'f> Walker<'f> {
    fn scan(&mut self, tree: &BodyTree, id: NodeId, out: &mut String) -> Result<(), NormalizeError> {
        let node = tree.node(id);
        if !node.kind.is_suppressed() {
            out.push_str(node.kind.name());
            out.push(' ');
        }
        match node.kind {
            TreeKind::Identifier => {
                if self.collecting {
                    if let Some(text) = &node.text {
                        out.push_str(text);
                    }
                }
                self.scan_children(tree, node, out)?;
            }
            TreeKind::MemberSelect => {
                self.collect_ids(tree, node, out)?;
            }
            TreeKind::MemberReference => {
                // The reference mode (invoke vs. new) distinguishes
                // `Foo::bar` from `Foo::new`.
                if let Some(mode) = &node.text {
                    out.push_str(mode);
                    out.push(' ');
                }
                self.collect_ids(tree, node, out)?;
            }
            TreeKind::InstanceOf | TreeKind::NewArray => {
                if let Some(type_text) = &node.text {
                    out.push_str(type_text);
                    out.push(' ');
                }
                self.scan_children(tree, node, out)?;
            }
            TreeKind::NewClass => {
                if let Some(identifier) = &node.text {
                    out.push_str(identifier);
                    out.push(' ');
                }
                self.scan_children(tree, node, out)?;
            }
            TreeKind::MethodInvocation => {
                // The last simple-name segment of the invoked expression:
                // `foo` for `x.bar.foo()`.
                match &node.text {
                    Some(name) => out.push_str(name),
                    None => {
                        if let Some(name) = last_identifier(tree, id) {
                            out.push_str(name);
                        }
                    }
                }
                let substitution = self.resolve(tree, id, node)?;
                out.push_str(&substitution);
                out.push(' ');
                self.scan_children(tree, node, out)?;
            }
            TreeKind::Throw => {
                let substitution = self.resolve(tree, id, node)?;
                out.push_str(&substitution);
                out.push(' ');
                self.scan_children(tree, node, out)?;
            }
            TreeKind::Variable => {
                // Resolved declared type, which normalizes `var` and import
                // aliasing across compilation units.
                if let Some(type_text) = &node.text {
                    out.push_str(type_text);
                    out.push(' ');
                }
                self.scan_children(tree, node, out)?;
            }
            TreeKind::Method => {
                if let Some(name) = &node.text {
                    out.push_str(name);
                    out.push(' ');
                }
                self.scan_children(tree, node, out)?;
            }
            kind if kind.is_compound_assignment() => {
                let substitution = self.resolve(tree, id, node)?;
                out.push_str(&substitution);
                out.push(' ');
                self.scan_children(tree, node, out)?;
            }
            kind if kind.is_literal() => {
                if let Some(value) = &node.text {
                    out.push_str(value);
                    out.push(' ');
                }
                self.scan_children(tree, node, out)?;
            }
            _ => self.scan_children(tree, node, out)?,
        }
        Ok(())
    }

    fn scan_children(
        &mut self,
        tree: &BodyTree,
        node: &BodyNode,
        out: &mut String,
    ) -> Result<(), NormalizeError> {
        for child in &node.children {
            self.scan(tree, *child, out)?;
        }
        Ok(())
    }

    fn collect_ids(
        &mut self,
        tree: &BodyTree,
        node: &BodyNode,
        out: &mut String,
    ) -> Result<(), NormalizeError> {
        let saved = self.collecting;
        self.collecting = true;
        let result = self.scan_children(tree, node, out);
        self.collecting = saved;
        result
    }

    /// Resolve the current position to a member and return its substitution:
    /// the memoized normalized text of the target's body, the bare key at
    /// the closure boundary, a recursion sentinel on self-reference, or the
    /// node's textual form when nothing resolves.
    fn resolve(
        &mut self,
        tree: &BodyTree,
        id: NodeId,
        node: &BodyNode,
    ) -> Result<String, NormalizeError> {
        let Some(key) = &node.target else {
            return Ok(node
                .source_text
                .clone()
                .unwrap_or_else(|| node.kind.name().to_string()));
        };
        let key_string = key.to_string();
        if let Some(cached) = self.subs.get(&key_string) {
            return Ok(cached.clone());
        }
        match self.frontend.member_source(key) {
            SourceLookup::Unavailable => {
                tracing::debug!(
                    target: "sighash.normalize",
                    key = %key_string,
                    "no source for resolved member; closure stops here"
                );
                self.subs.insert(key_string.clone(), key_string.clone());
                Ok(key_string)
            }
            SourceLookup::Found(target) => {
                let sentinel = format!("<recurse-{key_string}>");
                if std::ptr::eq(target, tree) && target.root == id {
                    return Ok(sentinel);
                }
                if self.depth >= self.max_depth {
                    tracing::error!(
                        target: "sighash.normalize",
                        key = %key_string,
                        limit = self.max_depth,
                        "closure depth ceiling hit; aborting this drill-down"
                    );
                    return Err(NormalizeError::ClosureDepthExceeded {
                        key: key_string,
                        limit: self.max_depth,
                    });
                }
                // Pre-seeding the sentinel is what terminates mutual
                // recursion: the second arrival at this key sees it and
                // stops instead of expanding again.
                self.subs.insert(key_string.clone(), sentinel);
                let saved = self.collecting;
                self.collecting = false;
                self.depth += 1;
                let mut buf = String::new();
                let result = self.scan(target, target.root, &mut buf);
                self.depth -= 1;
                self.collecting = saved;
                result?;
                self.subs.insert(key_string, buf.clone());
                Ok(buf)
            }
        }
    }
}

/// Text of the last identifier node, in document order, under `id`.
fn last_identifier(tree: &BodyTree, id: NodeId) -> Option<&str> {
    let node = tree.node(id);
    for child in node.children.iter().rev() {
        if let Some(found) = last_identifier(tree, *child) {
            return Some(found);
        }
    }
    if node.kind == TreeKind::Identifier {
        return node.text.as_deref();
    }
    None
}

#[cfg(test)]
mod tests;
