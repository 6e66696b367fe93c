//! Map-reference expansion and single-reaction equations.

use tracing::debug;

use keggraph_core::{GraphNode, NodeKind};
use keggraph_flatfile::{field_lines, parse_equation, Equation};

use crate::client::KeggRest;
use crate::db::{DatabaseType, FieldType};
use crate::error::Result;
use crate::fetch::Fetch;

/// The pathway a map-reference node points at (`path:map00020`).
pub fn expansion_target(node: &GraphNode) -> Option<&str> {
    if node.kind != NodeKind::MapReference {
        return None;
    }
    node.labels.first().map(String::as_str)
}

impl<F: Fetch> KeggRest<F> {
    /// Raw KGML markup of the pathway behind a map-reference node, or
    /// `None` for any other node.
    pub fn fetch_expansion(&self, node: &GraphNode) -> Result<Option<String>> {
        let Some(pathway) = expansion_target(node) else {
            return Ok(None);
        };
        let url = self.endpoints().kgml(pathway);
        debug!(node = %node.id, %pathway, "expanding map reference");
        Ok(Some(self.fetch_url(&url)?))
    }

    /// Reactants and products of one reaction's EQUATION field.
    pub fn reaction_equation(&self, reaction_id: &str) -> Result<Equation> {
        let body = self.entry_field(DatabaseType::Reaction, reaction_id, FieldType::Equation)?;
        Ok(parse_equation(&field_lines(&body).join(" "))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestConfig;
    use crate::error::ResolveError;
    use crate::fetch::StaticFetch;

    #[test]
    fn map_nodes_expand_to_kgml() {
        let fetch = StaticFetch::new().with("https://rest.kegg.jp/get/map00020/kgml", "<pathway name=\"path:map00020\"/>");
        let rest = KeggRest::new(fetch, &RestConfig::default()).unwrap();

        let map = GraphNode::new("54", NodeKind::MapReference).with_labels(["path:map00020"]);
        let kgml = rest.fetch_expansion(&map).unwrap();
        assert!(kgml.unwrap().contains("map00020"));

        let compound = GraphNode::new("1", NodeKind::Compound).with_labels(["cpd:C00022"]);
        assert!(rest.fetch_expansion(&compound).unwrap().is_none());
        assert_eq!(rest.fetcher().request_count(), 1);
    }

    #[test]
    fn equation_is_fetched_and_split() {
        let fetch = StaticFetch::new().with(
            "http://togows.dbcls.jp/entry/reaction/R00209/equation",
            "C00022 + C00010 + C00003 <=> C00024 + C00011 + C00004\n",
        );
        let rest = KeggRest::new(fetch, &RestConfig::default()).unwrap();
        let eq = rest.reaction_equation("rn:R00209").unwrap();
        assert_eq!(eq.reactants, ["C00022", "C00010", "C00003"]);
        assert_eq!(eq.products, ["C00024", "C00011", "C00004"]);
    }

    #[test]
    fn missing_equation_is_a_shape_error() {
        let fetch = StaticFetch::new().with("http://togows.dbcls.jp/entry/reaction/R99999/equation", "");
        let rest = KeggRest::new(fetch, &RestConfig::default()).unwrap();
        let err = rest.reaction_equation("R99999").unwrap_err();
        assert!(matches!(err, ResolveError::Equation(_)));
    }
}
