//! keggraph CLI
//!
//! - `map`: structural pathway description (JSON) -> graph JSON or attribute tables,
//!   optionally enriched from the remote databases
//! - `annotations`: pathway-level annotations of one pathway
//! - `reactions`: gene -> ortholog -> reaction resolution
//! - `equation`: split a reaction equation
//! - `expand`: fetch the markup behind a map-reference node

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use keggraph_core::{map_pathway, Diagnostic, PathwayDescription, PathwayGraph, SharedGraph, TableSink};
use keggraph_flatfile::{parse_equation, CurrencySet};
use keggraph_rest::{EnrichOptions, EnrichReport, Enricher, Fetch, KeggRest, Pass};

mod remote;

use remote::RestArgs;

const DEFAULT_LOG_FILTER: &str = "keggraph=info";
const VERBOSE_LOG_FILTER: &str = "keggraph=debug";

#[derive(Parser)]
#[command(name = "keggraph")]
#[command(author, version, about = "keggraph: annotated pathway graphs from KEGG records")]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    rest: RestArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a pathway description (JSON) into a graph.
    Map {
        /// Pathway description JSON (entries, relations, reactions).
        input: PathBuf,

        /// Output file (stdout if omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Graph)]
        format: OutputFormat,

        /// Run remote enrichment passes after mapping.
        #[arg(long)]
        enrich: bool,

        /// Passes to run with `--enrich` (repeatable; default: all).
        #[arg(long = "pass", value_enum)]
        passes: Vec<PassArg>,

        /// Extra currency compounds excluded from compound-pair edges (repeatable).
        #[arg(long)]
        currency: Vec<String>,

        /// Start from an empty currency set instead of the built-in cofactors.
        #[arg(long)]
        no_default_currency: bool,
    },

    /// Resolve the modules, diseases, db links and related pathways of a pathway.
    Annotations {
        /// Pathway ID (`map00010`, `path:hsa00010`).
        pathway: String,

        /// Read the whole flat record in one request instead of per field.
        #[arg(long)]
        record: bool,
    },

    /// Resolve genes to reactions through ortholog groups.
    Reactions {
        /// Gene IDs (`hsa:10327`).
        #[arg(required = true)]
        genes: Vec<String>,
    },

    /// Split a reaction equation into reactants and products.
    Equation {
        /// Reaction ID to fetch (`R00209`).
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        reaction: Option<String>,

        /// Parse this equation text instead of fetching.
        #[arg(long)]
        text: Option<String>,
    },

    /// Fetch the markup of the pathway behind a map-reference node.
    Expand {
        /// Pathway description JSON containing the node.
        input: PathBuf,

        /// Entry ID of the map-reference node.
        node: String,

        /// Output file (stdout if omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The graph model as JSON.
    Graph,
    /// Node/edge/network attribute tables as JSON.
    Table,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PassArg {
    Annotations,
    CompoundPairs,
    CompoundNames,
}

impl From<PassArg> for Pass {
    fn from(arg: PassArg) -> Self {
        match arg {
            PassArg::Annotations => Pass::Annotations,
            PassArg::CompoundPairs => Pass::CompoundPairs,
            PassArg::CompoundNames => Pass::CompoundNames,
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_LOG_FILTER } else { DEFAULT_LOG_FILTER };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Map {
            input,
            out,
            format,
            enrich,
            passes,
            currency,
            no_default_currency,
        } => {
            let description = read_description(&input)?;
            let options = enrich_options(&passes, &currency, no_default_currency);
            let graph = if enrich {
                let client = cli.rest.client()?;
                build_graph(&description, Some((&client, options)))
            } else {
                build_graph::<keggraph_rest::RestClient>(&description, None)
            };
            match format {
                OutputFormat::Graph => write_json(&graph, out.as_deref())?,
                OutputFormat::Table => write_json(&TableSink::from_graph(&graph), out.as_deref())?,
            }
        }
        Commands::Annotations { pathway, record } => {
            let client = cli.rest.client()?;
            let set = if record {
                let resolved = client.resolve_annotations_from_record(&pathway)?;
                report_diagnostics("annotations", &resolved.diagnostics);
                resolved.value
            } else {
                client.resolve_annotations(&pathway)?
            };
            write_json(&set, None)?;
        }
        Commands::Reactions { genes } => {
            let client = cli.rest.client()?;
            let resolved = client.resolve_orthology(&genes)?;
            report_diagnostics("reactions", &resolved.diagnostics);
            eprintln!(
                "{} {} gene(s) -> {} ortholog group(s) -> {} reaction(s)",
                "ok".green().bold(),
                genes.len(),
                resolved.value.orthologs.len(),
                resolved.value.reactions.len()
            );
            for reaction in &resolved.value.reactions {
                println!("{reaction}");
            }
        }
        Commands::Equation { reaction, text } => {
            let equation = match (reaction, text) {
                (_, Some(text)) => parse_equation(&text)?,
                (Some(reaction), None) => cli.rest.client()?.reaction_equation(&reaction)?,
                (None, None) => return Err(anyhow!("either a reaction ID or --text is required")),
            };
            write_json(&equation, None)?;
        }
        Commands::Expand { input, node, out } => {
            let description = read_description(&input)?;
            let graph = build_graph::<keggraph_rest::RestClient>(&description, None);
            let node = graph
                .node(&node)
                .ok_or_else(|| anyhow!("no entry '{node}' in {}", input.display()))?;
            let client = cli.rest.client()?;
            let markup = client
                .fetch_expansion(node)?
                .ok_or_else(|| anyhow!("entry '{}' is a {} node, not a map reference", node.id, node.kind))?;
            write_text(&markup, out.as_deref())?;
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_description(path: &Path) -> Result<PathwayDescription> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a pathway description", path.display()))
}

fn enrich_options(passes: &[PassArg], currency: &[String], no_default_currency: bool) -> EnrichOptions {
    let mut set = if no_default_currency {
        CurrencySet::empty()
    } else {
        CurrencySet::default()
    };
    set.extend(currency);
    EnrichOptions {
        passes: if passes.is_empty() {
            Pass::ALL.to_vec()
        } else {
            passes.iter().map(|&p| p.into()).collect()
        },
        currency: set,
    }
}

/// Map `description`, then run enrichment when a client is given.
fn build_graph<F: Fetch>(
    description: &PathwayDescription,
    enrich: Option<(&KeggRest<F>, EnrichOptions)>,
) -> PathwayGraph {
    let mapped = map_pathway(description);
    report_diagnostics("map", &mapped.diagnostics);
    let graph = mapped.value;
    eprintln!(
        "{} mapped {} ({} nodes, {} edges)",
        "ok".green().bold(),
        graph.id,
        graph.node_count(),
        graph.edge_count()
    );

    let Some((client, options)) = enrich else {
        return graph;
    };
    let shared = SharedGraph::new(graph);
    let report = Enricher::new(client, options).run_all(&shared);
    report_enrichment(&report);
    shared.into_inner()
}

fn report_diagnostics(stage: &str, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("{} [{stage}] {d}", "skipped:".yellow().bold());
    }
}

fn report_enrichment(report: &EnrichReport) {
    for summary in &report.completed {
        report_diagnostics(summary.pass.as_str(), &summary.diagnostics);
        eprintln!("{} {} (+{})", "ok".green().bold(), summary.pass, summary.added);
    }
    for (pass, error) in &report.failed {
        eprintln!("{} {pass}: {error}", "failed:".red().bold());
    }
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
        }
        None => println!("{text}"),
    }
    Ok(())
}
