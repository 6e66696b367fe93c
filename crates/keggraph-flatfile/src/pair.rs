//! Reaction PAIR decoding and compound-pair edge synthesis.
//!
//! A PAIR sub-line reads `RP00010  C00022_C00024 main`: a pair ID, two
//! spaces, `substrate_product`, a space and the category. Only `main` pairs
//! between non-currency compounds already on the map become edges.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use keggraph_core::{Diagnostic, EdgeKind, GraphEdge, PathwayGraph, RecordParseError, Resolved};

use crate::currency::CurrencySet;
use crate::record::parse_records;

/// Field tags carrying compound pairs (`RPAIR` in KEGG reaction records).
pub const PAIR_TAGS: [&str; 2] = ["RPAIR", "PAIR"];

pub const MAIN_CATEGORY: &str = "main";

fn pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<pair>\S+) {2,}(?P<substrate>[A-Z]\d{5})_(?P<product>[A-Z]\d{5})(?: +(?P<category>\S+))?",
        )
        .expect("valid PAIR regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundPair {
    pub pair_id: String,
    pub substrate: String,
    pub product: String,
    pub category: String,
}

impl CompoundPair {
    pub fn is_main(&self) -> bool {
        self.category == MAIN_CATEGORY
    }
}

pub fn decode_pair_line(line: &str) -> Result<CompoundPair, RecordParseError> {
    let line = line.trim();
    let caps = pair_re().captures(line).ok_or_else(|| {
        RecordParseError::new(
            "PAIR line",
            "expected `<pair-id>  <substrate>_<product> <category>`",
            line,
        )
    })?;
    let category = caps
        .name("category")
        .ok_or_else(|| RecordParseError::new("PAIR line", "missing category", line))?;
    Ok(CompoundPair {
        pair_id: caps["pair"].to_string(),
        substrate: caps["substrate"].to_string(),
        product: caps["product"].to_string(),
        category: category.as_str().to_string(),
    })
}

/// Decode every PAIR sub-line of every record in `raw`.
pub fn decode_pairs(raw: &str) -> Resolved<Vec<CompoundPair>> {
    let (records, errors) = parse_records(raw);
    let mut diagnostics: Vec<Diagnostic> = errors.into_iter().map(Into::into).collect();
    let mut pairs = Vec::new();

    for record in &records {
        let Some(field) = record.field_any(&PAIR_TAGS) else {
            continue;
        };
        for line in &field.lines {
            match decode_pair_line(line) {
                Ok(pair) => pairs.push(pair),
                Err(e) => diagnostics.push(e.into()),
            }
        }
    }

    Resolved::with_diagnostics(pairs, diagnostics)
}

/// Compound-pair edges implied by the raw reaction records in `raw`.
///
/// The graph is only read; commit the returned edges with
/// [`PathwayGraph::add_edge`] or `SharedGraph::add_edges`.
pub fn resolve_pairs(raw: &str, graph: &PathwayGraph, currency: &CurrencySet) -> Resolved<Vec<GraphEdge>> {
    let decoded = decode_pairs(raw);
    let index = graph.label_index();
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for pair in &decoded.value {
        if !pair.is_main() || currency.contains(&pair.substrate) || currency.contains(&pair.product) {
            continue;
        }
        let (Some(source), Some(target)) = (index.first(&pair.substrate), index.first(&pair.product))
        else {
            continue;
        };
        let edge = GraphEdge::new(source, target, EdgeKind::CompoundPair, pair.category.clone());
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
    }

    debug!(
        pairs = decoded.value.len(),
        edges = edges.len(),
        malformed = decoded.diagnostics.len(),
        "resolved compound pairs"
    );
    Resolved::with_diagnostics(edges, decoded.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keggraph_core::{GraphNode, NodeKind};

    const R00209: &str = "\
ENTRY       R00209                      Reaction
EQUATION    C00022 + C00010 + C00003 <=> C00024 + C00011 + C00004
RPAIR       RP00010  C00022_C00024 main
            RP05777  C00003_C00004 cofac
            RP12345  C00010_C00024 main
            RP00011  C00022_C00011 leave
///
";

    fn graph() -> PathwayGraph {
        let mut g = PathwayGraph::new("path:map00010", "00010", "Glycolysis");
        for (id, cpd) in [
            ("1", "C00022"),
            ("2", "C00024"),
            ("3", "C00003"),
            ("4", "C00004"),
            ("5", "C00010"),
            ("6", "C00011"),
        ] {
            g.upsert_node(GraphNode::new(id, NodeKind::Compound).with_labels([format!("cpd:{cpd}")]));
        }
        g
    }

    #[test]
    fn decodes_named_parts() {
        let p = decode_pair_line("RP00010  C00022_C00024 main").unwrap();
        assert_eq!(p.pair_id, "RP00010");
        assert_eq!(p.substrate, "C00022");
        assert_eq!(p.product, "C00024");
        assert_eq!(p.category, "main");
        assert!(p.is_main());
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert!(decode_pair_line("RP00010 C00022_C00024 main").is_err());
        assert!(decode_pair_line("RP00010  C00022-C00024 main").is_err());
        let err = decode_pair_line("RP00010  C00022_C00024").unwrap_err();
        assert_eq!(err.message, "missing category");
    }

    #[test]
    fn only_main_non_currency_pairs_become_edges() {
        let resolved = resolve_pairs(R00209, &graph(), &CurrencySet::default());
        assert!(resolved.is_clean());
        let edges = resolved.value;
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("1", "2"));
        assert_eq!(edges[0].kind, EdgeKind::CompoundPair);
        assert_eq!(edges[0].subtype, "main");
    }

    #[test]
    fn pairs_outside_the_graph_are_skipped() {
        let mut g = PathwayGraph::default();
        g.upsert_node(GraphNode::new("1", NodeKind::Compound).with_labels(["cpd:C00022"]));
        let resolved = resolve_pairs(R00209, &g, &CurrencySet::default());
        assert!(resolved.value.is_empty());
        assert!(resolved.is_clean());
    }

    #[test]
    fn plain_pair_tag_is_accepted() {
        let raw = "ENTRY       R00001\nPAIR        RP00010  C00022_C00024 main\n///\n";
        let resolved = resolve_pairs(raw, &graph(), &CurrencySet::empty());
        assert_eq!(resolved.value.len(), 1);
    }

    #[test]
    fn malformed_pair_does_not_stop_the_batch() {
        let raw = "\
ENTRY       R00001
RPAIR       garbage
            RP00010  C00022_C00024 main
///
";
        let resolved = resolve_pairs(raw, &graph(), &CurrencySet::default());
        assert_eq!(resolved.value.len(), 1);
        assert_eq!(resolved.diagnostics.len(), 1);
    }

    #[test]
    fn repeated_pairs_are_emitted_once() {
        let raw = format!("{R00209}{R00209}");
        let resolved = resolve_pairs(&raw, &graph(), &CurrencySet::default());
        assert_eq!(resolved.value.len(), 1);
    }
}
