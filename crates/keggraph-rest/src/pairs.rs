//! Compound-pair pass: reaction IDs -> raw reaction records -> edges.

use std::collections::BTreeSet;
use tracing::info;

use keggraph_core::{Diagnostic, GraphEdge, NodeKind, PathwayGraph, Resolved};
use keggraph_flatfile::{resolve_pairs, CurrencySet};

use crate::client::KeggRest;
use crate::error::Result;
use crate::fetch::Fetch;

/// Reaction references written on the graph's nodes (enzyme and gene
/// entries both carry them).
pub fn reaction_node_ids(graph: &PathwayGraph) -> BTreeSet<String> {
    graph
        .nodes()
        .iter()
        .flat_map(|n| n.reaction_ids())
        .map(str::to_string)
        .collect()
}

/// Labels of the graph's gene nodes.
pub fn gene_labels(graph: &PathwayGraph) -> BTreeSet<String> {
    graph
        .nodes_of_kind(NodeKind::Gene)
        .flat_map(|n| n.labels.iter().cloned())
        .collect()
}

impl<F: Fetch> KeggRest<F> {
    /// Reactions whose records are worth fetching for `graph`: those named
    /// on its nodes plus those reached from gene nodes through
    /// ortholog groups.
    pub fn pair_reaction_ids(&self, graph: &PathwayGraph) -> Result<Resolved<BTreeSet<String>>> {
        let mut ids = reaction_node_ids(graph);
        let genes = gene_labels(graph);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        ids.extend(self.resolve_reaction_ids(&genes)?.collect_into(&mut diagnostics));
        Ok(Resolved::with_diagnostics(ids, diagnostics))
    }

    /// Compound-pair edges for `graph`. The graph is not modified.
    pub fn resolve_pair_edges(
        &self,
        graph: &PathwayGraph,
        currency: &CurrencySet,
    ) -> Result<Resolved<Vec<GraphEdge>>> {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let ids: Vec<String> = self
            .pair_reaction_ids(graph)?
            .collect_into(&mut diagnostics)
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(Resolved::with_diagnostics(Vec::new(), diagnostics));
        }

        let text = self.get_entries(&ids)?;
        let edges = resolve_pairs(&text, graph, currency).collect_into(&mut diagnostics);
        info!(
            pathway = %graph.id,
            reactions = ids.len(),
            edges = edges.len(),
            skipped = diagnostics.len(),
            "resolved compound pairs"
        );
        Ok(Resolved::with_diagnostics(edges, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestConfig;
    use crate::fetch::StaticFetch;
    use keggraph_core::{EdgeKind, GraphNode};

    const R00200: &str = "\
ENTRY       R00200                      Reaction
EQUATION    C00002 + C00022 <=> C00008 + C00074
RPAIR       RP00003  C00002_C00008 cofac
            RP00012  C00022_C00074 main
///
";

    const R00658: &str = "\
ENTRY       R00658                      Reaction
EQUATION    C00631 <=> C00074 + C00001
RPAIR       RP00421  C00631_C00074 main
///
";

    fn graph() -> PathwayGraph {
        let mut g = PathwayGraph::new("path:hsa00010", "00010", "Glycolysis");
        for (id, cpd) in [("1", "C00022"), ("2", "C00074"), ("3", "C00631"), ("4", "C00002"), ("5", "C00008")] {
            g.upsert_node(GraphNode::new(id, NodeKind::Compound).with_labels([format!("cpd:{cpd}")]));
        }
        let mut enzyme = GraphNode::new("10", NodeKind::Enzyme).with_labels(["hsa:5315"]);
        enzyme.reaction = Some("rn:R00200".to_string());
        g.upsert_node(enzyme);
        g.upsert_node(GraphNode::new("11", NodeKind::Gene).with_labels(["hsa:2023"]));
        g
    }

    fn fetch() -> StaticFetch {
        StaticFetch::new()
            .with("https://rest.kegg.jp/link/orthology/hsa:2023", "hsa:2023\tko:K01689\n")
            .with("https://rest.kegg.jp/link/reaction/ko:K01689", "ko:K01689\trn:R00658\n")
            .with("https://rest.kegg.jp/get/rn:R00200+rn:R00658", format!("{R00200}{R00658}"))
    }

    #[test]
    fn reaction_ids_union_nodes_and_orthology() {
        let rest = KeggRest::new(fetch(), &RestConfig::default()).unwrap();
        let ids = rest.pair_reaction_ids(&graph()).unwrap().value;
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), ["rn:R00200", "rn:R00658"]);
    }

    #[test]
    fn main_pairs_become_edges() {
        let rest = KeggRest::new(fetch(), &RestConfig::default()).unwrap();
        let resolved = rest.resolve_pair_edges(&graph(), &CurrencySet::default()).unwrap();
        assert!(resolved.is_clean());
        let pairs: Vec<(&str, &str)> = resolved
            .value
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, [("1", "2"), ("3", "2")]);
        assert!(resolved.value.iter().all(|e| e.kind == EdgeKind::CompoundPair));
    }

    #[test]
    fn graph_without_reactions_fetches_nothing() {
        let mut g = PathwayGraph::new("path:map00010", "00010", "");
        g.upsert_node(GraphNode::new("1", NodeKind::Compound).with_labels(["cpd:C00022"]));
        let rest = KeggRest::new(StaticFetch::new(), &RestConfig::default()).unwrap();
        let resolved = rest.resolve_pair_edges(&g, &CurrencySet::default()).unwrap();
        assert!(resolved.value.is_empty());
        assert_eq!(rest.fetcher().request_count(), 0);
    }
}
