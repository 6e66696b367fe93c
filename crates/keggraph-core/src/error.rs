//! Data-level error kinds and collected diagnostics.
//!
//! Nothing in this module aborts a mapping or resolution pass. Structural
//! and flat-text failures are per-edge / per-item: the offending item is
//! skipped and a [`Diagnostic`] is collected for the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::EdgeKind;

/// An edge or cross-reference named an identifier absent from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("unresolved {context} reference '{missing}' ({source_id} -> {target_id})")]
pub struct UnresolvedReference {
    /// The kind of edge that could not be committed.
    pub context: EdgeKind,
    /// The identifier that was not found.
    pub missing: String,
    pub source_id: String,
    pub target_id: String,
}

/// A tagged field, PAIR sub-line or link-table line did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("malformed {what}: {message} (input: {input:?})")]
pub struct RecordParseError {
    /// What was being decoded (`"PAIR line"`, `"link line"`, ...).
    pub what: String,
    pub message: String,
    pub input: String,
}

impl RecordParseError {
    pub fn new(what: impl Into<String>, message: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            message: message.into(),
            input: input.into(),
        }
    }
}

/// An equation field did not split into exactly two sides on `<=>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("equation has {sides} side(s), expected 2: {input:?}")]
pub struct EquationShapeError {
    pub sides: usize,
    pub input: String,
}

/// A serialized graph could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphDecodeError {
    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: String },
    #[error(transparent)]
    Unresolved(#[from] UnresolvedReference),
}

/// A collected, non-fatal failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error(transparent)]
    UnresolvedReference(#[from] UnresolvedReference),
    #[error(transparent)]
    RecordParse(#[from] RecordParseError),
    #[error(transparent)]
    EquationShape(#[from] EquationShapeError),
}

/// A value produced by a pass together with everything it skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Splits into the value, appending this pass's diagnostics onto `sink`.
    pub fn collect_into(self, sink: &mut Vec<Diagnostic>) -> T {
        sink.extend(self.diagnostics);
        self.value
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_render_their_source_error() {
        let d: Diagnostic = UnresolvedReference {
            context: EdgeKind::Relation,
            missing: "99".to_string(),
            source_id: "1".to_string(),
            target_id: "99".to_string(),
        }
        .into();
        assert_eq!(d.to_string(), "unresolved relation reference '99' (1 -> 99)");

        let d: Diagnostic = EquationShapeError {
            sides: 1,
            input: "C00001".to_string(),
        }
        .into();
        assert!(d.to_string().contains("1 side(s)"));
    }

    #[test]
    fn collect_into_moves_diagnostics() {
        let resolved = Resolved::with_diagnostics(
            3,
            vec![RecordParseError::new("PAIR line", "no category", "RP1  C00001_C00002").into()],
        );
        let mut sink = Vec::new();
        let value = resolved.collect_into(&mut sink);
        assert_eq!(value, 3);
        assert_eq!(sink.len(), 1);
    }
}
