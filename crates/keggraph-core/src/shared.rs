//! One coarse lock per graph for concurrent enrichment passes.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::{Diagnostic, Resolved};
use crate::graph::{AnnotationSet, GraphEdge, PathwayGraph};

/// A pathway graph shared between enrichment passes.
///
/// Passes read a [`snapshot`](Self::snapshot) of the base graph and write
/// through the lock; writers to one graph are mutually exclusive.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<Mutex<PathwayGraph>>,
}

impl SharedGraph {
    pub fn new(graph: PathwayGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    pub fn snapshot(&self) -> PathwayGraph {
        self.inner.lock().clone()
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut PathwayGraph) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Commit edges under a single lock acquisition. Returns how many were
    /// new; unresolved endpoints are reported, never committed.
    pub fn add_edges(&self, edges: impl IntoIterator<Item = GraphEdge>) -> Resolved<usize> {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut added = 0;
        let mut guard = self.inner.lock();
        for edge in edges {
            match guard.add_edge(edge) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(unresolved) => diagnostics.push(unresolved.into()),
            }
        }
        Resolved::with_diagnostics(added, diagnostics)
    }

    pub fn merge_annotations(&self, annotations: AnnotationSet) {
        self.inner.lock().merge_annotations(annotations);
    }

    /// Returns the graph if this is the last handle, otherwise a clone.
    pub fn into_inner(self) -> PathwayGraph {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}
