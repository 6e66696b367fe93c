//! Structural mapping: pathway description -> [`PathwayGraph`].
//!
//! Entries become nodes. Relations and reactions become edges, except on the
//! global map, where every reaction is collapsed into direct
//! substrate -> product edges. An edge naming an unknown entry is skipped and
//! reported; mapping of the remaining records continues.

use tracing::{debug, warn};

use crate::error::{Diagnostic, Resolved};
use crate::graph::{EdgeKind, GraphEdge, GraphNode, PathwayGraph};
use crate::pathway::{EntryRecord, PathwayDescription, ReactionRecord, RelationRecord};

pub fn map_pathway(description: &PathwayDescription) -> Resolved<PathwayGraph> {
    let mut graph = PathwayGraph::new(
        description.name.clone(),
        description.number.clone(),
        description.title.clone(),
    );
    let mut diagnostics = Vec::new();

    for entry in &description.entries {
        graph.upsert_node(entry_node(entry));
    }

    if description.is_global_map() {
        debug!(pathway = %description.name, "mapping global map reactions");
        for reaction in &description.reactions {
            map_global_reaction(&mut graph, reaction, &mut diagnostics);
        }
    } else {
        for relation in &description.relations {
            map_relation(&mut graph, relation, &mut diagnostics);
        }
        for reaction in &description.reactions {
            map_reaction(&mut graph, reaction, &mut diagnostics);
        }
    }

    if !diagnostics.is_empty() {
        warn!(
            pathway = %description.name,
            skipped = diagnostics.len(),
            "skipped edges with unresolved entry references"
        );
    }
    debug!(
        pathway = %description.name,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "mapped pathway"
    );

    Resolved::with_diagnostics(graph, diagnostics)
}

fn entry_node(entry: &EntryRecord) -> GraphNode {
    let mut node = GraphNode::new(entry.id.clone(), entry.kind)
        .with_labels(entry.name.split_whitespace());
    node.reaction = entry.reaction.clone();
    if let Some(graphics) = &entry.graphics {
        node.geometry = graphics.geometry();
        node.colors = graphics.colors();
        node.label = graphics.name.clone();
    }
    node
}

fn commit(graph: &mut PathwayGraph, edge: GraphEdge, diagnostics: &mut Vec<Diagnostic>) {
    if let Err(unresolved) = graph.add_edge(edge) {
        diagnostics.push(unresolved.into());
    }
}

fn map_relation(graph: &mut PathwayGraph, relation: &RelationRecord, diagnostics: &mut Vec<Diagnostic>) {
    let edge = GraphEdge::new(
        relation.entry1.clone(),
        relation.entry2.clone(),
        EdgeKind::Relation,
        relation.relation_type.clone(),
    );
    commit(graph, edge, diagnostics);
}

fn map_reaction(graph: &mut PathwayGraph, reaction: &ReactionRecord, diagnostics: &mut Vec<Diagnostic>) {
    for substrate in &reaction.substrates {
        let edge = GraphEdge::new(
            substrate.clone(),
            reaction.id.clone(),
            EdgeKind::ReactionSubstrate,
            reaction.reaction_type.clone(),
        )
        .with_reaction(reaction.name.clone());
        commit(graph, edge, diagnostics);
    }
    for product in &reaction.products {
        let edge = GraphEdge::new(
            reaction.id.clone(),
            product.clone(),
            EdgeKind::ReactionProduct,
            reaction.reaction_type.clone(),
        )
        .with_reaction(reaction.name.clone());
        commit(graph, edge, diagnostics);
    }
}

fn map_global_reaction(
    graph: &mut PathwayGraph,
    reaction: &ReactionRecord,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for substrate in &reaction.substrates {
        for product in &reaction.products {
            let edge = GraphEdge::new(
                substrate.clone(),
                product.clone(),
                EdgeKind::GlobalReaction,
                reaction.reaction_type.clone(),
            )
            .with_reaction(reaction.name.clone());
            commit(graph, edge, diagnostics);
        }
    }
}
