//! Remote record resolution for keggraph.
//!
//! Everything remote funnels through one primitive, [`Fetch`]. A
//! [`KeggRest`] pairs a fetcher with the configured endpoints and carries
//! the resolver passes:
//!
//! - orthology chains (gene -> ortholog group -> reaction)
//! - pathway annotations and per-module reaction lists
//! - compound-pair edges from raw reaction records
//! - compound display names
//! - map-reference expansion and single-reaction equations
//!
//! [`Enricher`] runs the graph-writing passes concurrently over a
//! [`keggraph_core::SharedGraph`].

pub mod annotations;
pub mod client;
pub mod compounds;
pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod expand;
pub mod fetch;
pub mod orthology;
pub mod pairs;

pub use annotations::ANNOTATION_FIELDS;
pub use client::KeggRest;
pub use compounds::{apply_compound_names, first_name};
pub use config::{ConfigError, RestConfig};
pub use db::{DatabaseType, Endpoints, FieldType, LinkDatabase};
pub use enrich::{EnrichOptions, EnrichReport, Enricher, Pass, PassSummary};
pub use error::{FetchError, ResolveError, Result};
pub use expand::expansion_target;
pub use fetch::{Fetch, RestClient, StaticFetch};
pub use orthology::OrthologyChain;
pub use pairs::{gene_labels, reaction_node_ids};
