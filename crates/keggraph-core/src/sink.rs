//! Hand-off of a finished graph to a host network/table store.
//!
//! The store only needs "add node", "add edge" and "set attribute by key".
//! Attribute keys follow the KEGG column names used by network viewers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::graph::{AnnotationCategory, EdgeKind, PathwayGraph};

pub const KEGG_NODE_X: &str = "KEGG_NODE_X";
pub const KEGG_NODE_Y: &str = "KEGG_NODE_Y";
pub const KEGG_NODE_WIDTH: &str = "KEGG_NODE_WIDTH";
pub const KEGG_NODE_HEIGHT: &str = "KEGG_NODE_HEIGHT";
pub const KEGG_NODE_LABEL: &str = "KEGG_NODE_LABEL";
pub const KEGG_ID: &str = "KEGG_ID";
pub const KEGG_NODE_LABEL_COLOR: &str = "KEGG_NODE_LABEL_COLOR";
pub const KEGG_NODE_FILL_COLOR: &str = "KEGG_NODE_FILL_COLOR";
pub const KEGG_NODE_REACTIONID: &str = "KEGG_NODE_REACTIONID";
pub const KEGG_NODE_TYPE: &str = "KEGG_NODE_TYPE";
pub const KEGG_RELATION_TYPE: &str = "KEGG_RELATION_TYPE";
pub const KEGG_REACTION_TYPE: &str = "KEGG_REACTION_TYPE";
pub const KEGG_EDGE_KIND: &str = "KEGG_EDGE_KIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(list: Vec<String>) -> Self {
        AttributeValue::List(list)
    }
}

/// Host-side graph store.
pub trait GraphSink {
    type Node: Clone;
    type Edge;

    fn add_node(&mut self, id: &str) -> Self::Node;
    fn add_edge(&mut self, source: &Self::Node, target: &Self::Node, directed: bool) -> Self::Edge;
    fn set_node_attribute(&mut self, node: &Self::Node, key: &str, value: AttributeValue);
    fn set_edge_attribute(&mut self, edge: &Self::Edge, key: &str, value: AttributeValue);
    fn set_network_attribute(&mut self, key: &str, value: AttributeValue);
}

fn annotation_key(category: AnnotationCategory) -> &'static str {
    match category {
        AnnotationCategory::Module => "KEGG.moduleID",
        AnnotationCategory::Disease => "KEGG.disease",
        AnnotationCategory::DbLink => "KEGG.dblink",
        AnnotationCategory::RelatedPathway => "KEGG.relpathway",
    }
}

/// Push every node, edge and annotation of `graph` into `sink`.
pub fn export<S: GraphSink>(graph: &PathwayGraph, sink: &mut S) {
    sink.set_network_attribute("name", graph.id.as_str().into());
    sink.set_network_attribute("KEGG.number", graph.number.as_str().into());
    sink.set_network_attribute("KEGG.title", graph.title.as_str().into());

    let mut handles: HashMap<&str, S::Node> = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let h = sink.add_node(&node.id);
        sink.set_node_attribute(&h, KEGG_ID, node.labels.clone().into());
        sink.set_node_attribute(&h, KEGG_NODE_TYPE, node.kind.as_str().into());
        let geometry = [
            (KEGG_NODE_X, node.geometry.x),
            (KEGG_NODE_Y, node.geometry.y),
            (KEGG_NODE_WIDTH, node.geometry.width),
            (KEGG_NODE_HEIGHT, node.geometry.height),
        ];
        for (key, value) in geometry {
            if let Some(v) = value {
                sink.set_node_attribute(&h, key, v.into());
            }
        }
        let text = [
            (KEGG_NODE_LABEL, &node.label),
            (KEGG_NODE_REACTIONID, &node.reaction),
            (KEGG_NODE_LABEL_COLOR, &node.colors.foreground),
            (KEGG_NODE_FILL_COLOR, &node.colors.background),
        ];
        for (key, value) in text {
            if let Some(v) = value {
                sink.set_node_attribute(&h, key, v.clone().into());
            }
        }
        handles.insert(node.id.as_str(), h);
    }

    for edge in graph.edges() {
        // Endpoints are guaranteed by `PathwayGraph::add_edge`.
        let (Some(s), Some(t)) = (handles.get(edge.source.as_str()), handles.get(edge.target.as_str()))
        else {
            continue;
        };
        let e = sink.add_edge(s, t, edge.directed());
        sink.set_edge_attribute(&e, KEGG_EDGE_KIND, edge.kind.as_str().into());
        let subtype_key = match edge.kind {
            EdgeKind::Relation => KEGG_RELATION_TYPE,
            _ => KEGG_REACTION_TYPE,
        };
        sink.set_edge_attribute(&e, subtype_key, edge.subtype.clone().into());
    }

    for category in AnnotationCategory::ALL {
        let entries = graph.annotations.get(category);
        if !entries.is_empty() {
            sink.set_network_attribute(annotation_key(category), entries.to_vec().into());
        }
    }
    for (module, reactions) in &graph.annotations.module_reactions {
        sink.set_network_attribute(
            &format!("KEGG.moduleReaction.{module}"),
            reactions.clone().into(),
        );
    }
}

// ============================================================================
// In-memory table store
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub directed: bool,
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Node table, edge table and network attributes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSink {
    pub network: BTreeMap<String, AttributeValue>,
    pub nodes: Vec<TableRow>,
    pub edges: Vec<EdgeRow>,
}

impl TableSink {
    pub fn from_graph(graph: &PathwayGraph) -> Self {
        let mut sink = Self::default();
        export(graph, &mut sink);
        sink
    }
}

impl GraphSink for TableSink {
    type Node = usize;
    type Edge = usize;

    fn add_node(&mut self, id: &str) -> usize {
        self.nodes.push(TableRow {
            id: id.to_string(),
            attributes: BTreeMap::new(),
        });
        self.nodes.len() - 1
    }

    fn add_edge(&mut self, source: &usize, target: &usize, directed: bool) -> usize {
        self.edges.push(EdgeRow {
            source: self.nodes[*source].id.clone(),
            target: self.nodes[*target].id.clone(),
            directed,
            attributes: BTreeMap::new(),
        });
        self.edges.len() - 1
    }

    fn set_node_attribute(&mut self, node: &usize, key: &str, value: AttributeValue) {
        self.nodes[*node].attributes.insert(key.to_string(), value);
    }

    fn set_edge_attribute(&mut self, edge: &usize, key: &str, value: AttributeValue) {
        self.edges[*edge].attributes.insert(key.to_string(), value);
    }

    fn set_network_attribute(&mut self, key: &str, value: AttributeValue) {
        self.network.insert(key.to_string(), value);
    }
}
