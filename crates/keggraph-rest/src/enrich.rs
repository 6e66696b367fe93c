//! Running resolver passes against one graph.
//!
//! Every pass reads the same snapshot of the base graph, so passes can run
//! concurrently; their writes go through the [`SharedGraph`] lock. A fetch
//! failure aborts only the pass that hit it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::thread;
use tracing::{info, warn};

use keggraph_core::{AnnotationSet, Diagnostic, PathwayGraph, SharedGraph};
use keggraph_flatfile::CurrencySet;

use crate::client::KeggRest;
use crate::compounds::apply_compound_names;
use crate::error::{ResolveError, Result};
use crate::fetch::Fetch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pass {
    Annotations,
    CompoundPairs,
    CompoundNames,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Annotations, Pass::CompoundPairs, Pass::CompoundNames];

    pub fn as_str(self) -> &'static str {
        match self {
            Pass::Annotations => "annotations",
            Pass::CompoundPairs => "compound-pairs",
            Pass::CompoundNames => "compound-names",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub passes: Vec<Pass>,
    pub currency: CurrencySet,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            passes: Pass::ALL.to_vec(),
            currency: CurrencySet::default(),
        }
    }
}

/// What one finished pass changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassSummary {
    pub pass: Pass,
    /// New annotation entries, edges or node names written.
    pub added: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct EnrichReport {
    pub completed: Vec<PassSummary>,
    pub failed: Vec<(Pass, ResolveError)>,
}

impl EnrichReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self, pass: Pass) -> Option<&PassSummary> {
        self.completed.iter().find(|s| s.pass == pass)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.completed.iter().flat_map(|s| s.diagnostics.iter())
    }
}

pub struct Enricher<'a, F> {
    rest: &'a KeggRest<F>,
    options: EnrichOptions,
}

impl<'a, F: Fetch> Enricher<'a, F> {
    pub fn new(rest: &'a KeggRest<F>, options: EnrichOptions) -> Self {
        Self { rest, options }
    }

    pub fn options(&self) -> &EnrichOptions {
        &self.options
    }

    /// Run every configured pass, each on its own scoped thread.
    pub fn run_all(&self, graph: &SharedGraph) -> EnrichReport {
        let base = graph.snapshot();
        let base = &base;
        let results: Vec<(Pass, Result<PassSummary>)> = thread::scope(|s| {
            let handles: Vec<_> = self
                .options
                .passes
                .iter()
                .map(|&pass| (pass, s.spawn(move || self.run_pass(pass, base, graph))))
                .collect();
            handles
                .into_iter()
                .map(|(pass, handle)| {
                    let result = handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                    (pass, result)
                })
                .collect()
        });

        let mut report = EnrichReport::default();
        for (pass, result) in results {
            match result {
                Ok(summary) => {
                    info!(
                        pathway = %base.id,
                        %pass,
                        added = summary.added,
                        skipped = summary.diagnostics.len(),
                        "pass complete"
                    );
                    report.completed.push(summary);
                }
                Err(e) => {
                    warn!(pathway = %base.id, %pass, error = %e, "pass aborted");
                    report.failed.push((pass, e));
                }
            }
        }
        report
    }

    /// Run one pass reading `base` and writing into `graph`.
    pub fn run_pass(&self, pass: Pass, base: &PathwayGraph, graph: &SharedGraph) -> Result<PassSummary> {
        match pass {
            Pass::Annotations => {
                let set = self.rest.resolve_annotations(&base.id)?;
                let added = graph.with_mut(|g| {
                    let before = annotation_entries(&g.annotations);
                    g.merge_annotations(set);
                    annotation_entries(&g.annotations) - before
                });
                Ok(PassSummary {
                    pass,
                    added,
                    diagnostics: Vec::new(),
                })
            }
            Pass::CompoundPairs => {
                let mut diagnostics = Vec::new();
                let edges = self
                    .rest
                    .resolve_pair_edges(base, &self.options.currency)?
                    .collect_into(&mut diagnostics);
                let added = graph.add_edges(edges).collect_into(&mut diagnostics);
                Ok(PassSummary {
                    pass,
                    added,
                    diagnostics,
                })
            }
            Pass::CompoundNames => {
                let names = self.rest.resolve_compound_names(base)?;
                let added = graph.with_mut(|g| apply_compound_names(g, &names));
                Ok(PassSummary {
                    pass,
                    added,
                    diagnostics: Vec::new(),
                })
            }
        }
    }
}

fn annotation_entries(set: &AnnotationSet) -> usize {
    set.categories.values().map(Vec::len).sum::<usize>()
        + set.module_reactions.values().map(Vec::len).sum::<usize>()
}
