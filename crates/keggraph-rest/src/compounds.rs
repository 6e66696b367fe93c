//! Compound display names.

use std::collections::BTreeMap;
use tracing::debug;

use keggraph_core::{NodeKind, PathwayGraph};
use keggraph_flatfile::field_lines;

use crate::client::KeggRest;
use crate::db::{DatabaseType, FieldType};
use crate::error::Result;
use crate::fetch::Fetch;

/// First name of a NAME field (`Pyruvate;\nPyruvic acid` -> `Pyruvate`).
pub fn first_name(name_field: &str) -> Option<String> {
    field_lines(name_field)
        .into_iter()
        .next()
        .map(|l| l.trim_end_matches(';').trim_end().to_string())
        .filter(|l| !l.is_empty())
}

/// Write resolved names into `graph`; returns how many nodes changed.
pub fn apply_compound_names(graph: &mut PathwayGraph, names: &BTreeMap<String, String>) -> usize {
    let mut changed = 0;
    for (node_id, name) in names {
        if let Some(node) = graph.node_mut(node_id) {
            if node.label.as_deref() != Some(name.as_str()) {
                node.label = Some(name.clone());
                changed += 1;
            }
        }
    }
    changed
}

impl<F: Fetch> KeggRest<F> {
    pub fn compound_name(&self, compound_id: &str) -> Result<Option<String>> {
        let body = self.entry_field(DatabaseType::Compound, compound_id, FieldType::Name)?;
        Ok(first_name(&body))
    }

    /// Node ID -> first compound name, for every compound node of `graph`
    /// with a label. Compounds without a name are left out.
    pub fn resolve_compound_names(&self, graph: &PathwayGraph) -> Result<BTreeMap<String, String>> {
        let mut names = BTreeMap::new();
        for node in graph.nodes_of_kind(NodeKind::Compound) {
            let Some(compound) = node.labels.first() else {
                continue;
            };
            if let Some(name) = self.compound_name(compound)? {
                names.insert(node.id.clone(), name);
            }
        }
        debug!(pathway = %graph.id, named = names.len(), "resolved compound names");
        Ok(names)
    }
}
