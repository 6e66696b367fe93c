//! Gene -> ortholog group -> reaction identifier chains.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

use keggraph_core::{Diagnostic, Resolved};
use keggraph_flatfile::link_targets;

use crate::client::KeggRest;
use crate::db::LinkDatabase;
use crate::error::Result;
use crate::fetch::Fetch;

/// Both hops of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrthologyChain {
    pub orthologs: BTreeSet<String>,
    pub reactions: BTreeSet<String>,
}

impl<F: Fetch> KeggRest<F> {
    /// Resolve genes to ortholog groups, then ortholog groups to reactions.
    ///
    /// Each hop is one link query; an empty hop yields an empty set and the
    /// next hop is not requested. Malformed link lines are reported.
    pub fn resolve_orthology<I, S>(&self, gene_ids: I) -> Result<Resolved<OrthologyChain>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let genes: Vec<String> = gene_ids
            .into_iter()
            .map(|g| g.as_ref().trim().to_string())
            .filter(|g| !g.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut chain = OrthologyChain::default();
        if genes.is_empty() {
            return Ok(Resolved::new(chain));
        }

        let table = self.link(LinkDatabase::Orthology, &genes)?;
        chain.orthologs = link_targets(&table).collect_into(&mut diagnostics);

        if !chain.orthologs.is_empty() {
            let orthologs: Vec<&String> = chain.orthologs.iter().collect();
            let table = self.link(LinkDatabase::Reaction, &orthologs)?;
            chain.reactions = link_targets(&table).collect_into(&mut diagnostics);
        }

        if !diagnostics.is_empty() {
            warn!(skipped = diagnostics.len(), "malformed link lines");
        }
        debug!(
            genes = genes.len(),
            orthologs = chain.orthologs.len(),
            reactions = chain.reactions.len(),
            "resolved orthology chain"
        );
        Ok(Resolved::with_diagnostics(chain, diagnostics))
    }

    /// Reaction IDs reachable from `gene_ids` through ortholog groups.
    pub fn resolve_reaction_ids<I, S>(&self, gene_ids: I) -> Result<Resolved<BTreeSet<String>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.resolve_orthology(gene_ids)?.map(|chain| chain.reactions))
    }
}
