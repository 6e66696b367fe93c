//! The annotated pathway graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{GraphDecodeError, UnresolvedReference};

// ============================================================================
// Closed vocabularies
// ============================================================================

/// Node kinds exposed to style rules.
///
/// Deserialization is lenient: entry types outside this vocabulary
/// (KGML `brite`, `other`, ...) become [`NodeKind::Other`] so one unusual
/// entry never rejects a whole description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum NodeKind {
    Gene,
    Ortholog,
    /// Enzyme / reaction entries (KGML `enzyme` and `reaction`).
    Enzyme,
    Compound,
    /// Links to another pathway diagram (KGML `map`).
    MapReference,
    Group,
    Other,
}

impl NodeKind {
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Gene,
        NodeKind::Ortholog,
        NodeKind::Enzyme,
        NodeKind::Compound,
        NodeKind::MapReference,
        NodeKind::Group,
        NodeKind::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Gene => "gene",
            NodeKind::Ortholog => "ortholog",
            NodeKind::Enzyme => "enzyme",
            NodeKind::Compound => "compound",
            NodeKind::MapReference => "map-reference",
            NodeKind::Group => "group",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(NodeKind::Gene),
            "ortholog" => Ok(NodeKind::Ortholog),
            "enzyme" | "reaction" => Ok(NodeKind::Enzyme),
            "compound" => Ok(NodeKind::Compound),
            "map-reference" | "map" => Ok(NodeKind::MapReference),
            "group" => Ok(NodeKind::Group),
            "brite" | "other" => Ok(NodeKind::Other),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(NodeKind::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Relation,
    ReactionSubstrate,
    ReactionProduct,
    CompoundPair,
    /// Direct substrate -> product edge of a global map.
    GlobalReaction,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Relation => "relation",
            EdgeKind::ReactionSubstrate => "reaction-substrate",
            EdgeKind::ReactionProduct => "reaction-product",
            EdgeKind::CompoundPair => "compound-pair",
            EdgeKind::GlobalReaction => "global-reaction",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationCategory {
    Module,
    Disease,
    DbLink,
    RelatedPathway,
}

impl AnnotationCategory {
    pub const ALL: [AnnotationCategory; 4] = [
        AnnotationCategory::Module,
        AnnotationCategory::Disease,
        AnnotationCategory::DbLink,
        AnnotationCategory::RelatedPathway,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationCategory::Module => "module",
            AnnotationCategory::Disease => "disease",
            AnnotationCategory::DbLink => "db-link",
            AnnotationCategory::RelatedPathway => "related-pathway",
        }
    }
}

// ============================================================================
// Nodes and edges
// ============================================================================

/// Diagram geometry, passed through untouched. Absent values stay absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub foreground: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// External database labels (`cpd:C00022`, `hsa:3098`, ...), in source order.
    #[serde(default)]
    pub labels: Vec<String>,
    pub kind: NodeKind,
    #[serde(default)]
    pub geometry: Geometry,
    pub label: Option<String>,
    /// Reaction reference(s) of enzyme and gene entries, as written in the source.
    pub reaction: Option<String>,
    #[serde(default)]
    pub colors: Colors,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            kind,
            geometry: Geometry::default(),
            label: None,
            reaction: None,
            colors: Colors::default(),
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// True if any label equals `id`, either verbatim or after dropping a
    /// `db:` prefix (`cpd:C00022` matches `C00022`).
    pub fn has_label(&self, id: &str) -> bool {
        self.labels.iter().any(|l| label_matches(l, id))
    }

    /// Reaction identifiers referenced by this node (`rn:R01070 rn:R01071`).
    pub fn reaction_ids(&self) -> impl Iterator<Item = &str> {
        self.reaction
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
    }
}

pub fn label_matches(label: &str, id: &str) -> bool {
    label == id || strip_db_prefix(label) == id
}

/// `cpd:C00022` -> `C00022`; labels without a prefix are returned unchanged.
pub fn strip_db_prefix(label: &str) -> &str {
    label.split_once(':').map_or(label, |(_, rest)| rest)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub subtype: String,
    /// Reaction the edge was derived from, when there is one.
    pub reaction: Option<String>,
}

impl GraphEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            subtype: subtype.into(),
            reaction: None,
        }
    }

    pub fn with_reaction(mut self, reaction: Option<String>) -> Self {
        self.reaction = reaction;
        self
    }

    /// Every pathway edge is directed.
    pub fn directed(&self) -> bool {
        true
    }
}

// ============================================================================
// Annotations
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub categories: BTreeMap<AnnotationCategory, Vec<String>>,
    /// Module ID -> reaction IDs of that module.
    pub module_reactions: BTreeMap<String, Vec<String>>,
}

impl AnnotationSet {
    pub fn get(&self, category: AnnotationCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ordered union: entries already present are not repeated.
    pub fn extend(&mut self, category: AnnotationCategory, entries: impl IntoIterator<Item = String>) {
        let list = self.categories.entry(category).or_default();
        extend_unique(list, entries);
    }

    pub fn extend_module_reactions(
        &mut self,
        module_id: &str,
        reactions: impl IntoIterator<Item = String>,
    ) {
        let list = self
            .module_reactions
            .entry(module_id.to_string())
            .or_default();
        extend_unique(list, reactions);
    }

    pub fn merge(&mut self, other: AnnotationSet) {
        for (category, entries) in other.categories {
            self.extend(category, entries);
        }
        for (module, reactions) in other.module_reactions {
            self.extend_module_reactions(&module, reactions);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty) && self.module_reactions.is_empty()
    }
}

fn extend_unique(list: &mut Vec<String>, entries: impl IntoIterator<Item = String>) {
    let mut seen: HashSet<String> = list.iter().cloned().collect();
    for e in entries {
        if seen.insert(e.clone()) {
            list.push(e);
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// Deserializes through [`GraphRepr`], so loaded graphs have their lookup
/// tables built and never hold dangling edges or repeated node IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr")]
pub struct PathwayGraph {
    pub id: String,
    /// Numeric pathway code (`00010`, `01100`, ...).
    pub number: String,
    pub title: String,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    pub annotations: AnnotationSet,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_set: HashSet<GraphEdge>,
}

impl PathwayGraph {
    pub fn new(id: impl Into<String>, number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Insert a node, or replace the node with the same ID in place.
    /// Returns true if the node was new.
    pub fn upsert_node(&mut self, node: GraphNode) -> bool {
        if let Some(&idx) = self.node_index.get(&node.id) {
            self.nodes[idx] = node;
            false
        } else {
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
            true
        }
    }

    /// Commit an edge. Both endpoints must already be nodes of this graph.
    /// Returns `Ok(false)` when an identical edge is already present.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<bool, UnresolvedReference> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.node_index.contains_key(endpoint) {
                return Err(UnresolvedReference {
                    context: edge.kind,
                    missing: endpoint.clone(),
                    source_id: edge.source.clone(),
                    target_id: edge.target.clone(),
                });
            }
        }
        if self.edge_set.contains(&edge) {
            return Ok(false);
        }
        self.edge_set.insert(edge.clone());
        self.edges.push(edge);
        Ok(true)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        match self.node_index.get(id) {
            Some(&i) => Some(&mut self.nodes[i]),
            None => None,
        }
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Ordered-union merge of resolved annotations.
    pub fn merge_annotations(&mut self, annotations: AnnotationSet) {
        self.annotations.merge(annotations);
    }

    /// Label -> node IDs (insertion order) for this graph's current nodes.
    pub fn label_index(&self) -> LabelIndex {
        LabelIndex::build(self)
    }
}

/// On-disk shape of a [`PathwayGraph`].
#[derive(Deserialize)]
struct GraphRepr {
    id: String,
    number: String,
    title: String,
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
    #[serde(default)]
    annotations: AnnotationSet,
}

impl TryFrom<GraphRepr> for PathwayGraph {
    type Error = GraphDecodeError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let mut graph = PathwayGraph::new(repr.id, repr.number, repr.title);
        for node in repr.nodes {
            let id = node.id.clone();
            if !graph.upsert_node(node) {
                return Err(GraphDecodeError::DuplicateNode { id });
            }
        }
        for edge in repr.edges {
            graph.add_edge(edge)?;
        }
        graph.annotations = repr.annotations;
        Ok(graph)
    }
}

/// Lookup from a bare database ID (`C00022`) to the nodes carrying it.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    by_label: HashMap<String, Vec<String>>,
}

impl LabelIndex {
    pub fn build(graph: &PathwayGraph) -> Self {
        let mut by_label: HashMap<String, Vec<String>> = HashMap::new();
        for node in graph.nodes() {
            for label in &node.labels {
                let mut keys = vec![label.as_str()];
                let bare = strip_db_prefix(label);
                if bare != label {
                    keys.push(bare);
                }
                for key in keys {
                    let ids = by_label.entry(key.to_string()).or_default();
                    if !ids.contains(&node.id) {
                        ids.push(node.id.clone());
                    }
                }
            }
        }
        Self { by_label }
    }

    /// First node (in insertion order) carrying `id`.
    pub fn first(&self, id: &str) -> Option<&str> {
        self.by_label
            .get(id)
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }

    pub fn all(&self, id: &str) -> &[String] {
        self.by_label.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
