//! keggraph core: the pathway graph model and the structural mapper.
//!
//! This crate is pure data + algorithms:
//! - [`graph`]: `PathwayGraph`, nodes, edges, annotation sets
//! - [`mapper`]: structural description -> graph (with the global-map variant)
//! - [`error`]: unresolved references, malformed records, collected diagnostics
//! - [`sink`]: hand-off to a host network/table store
//! - [`shared`]: per-graph lock used by concurrent enrichment passes
//!
//! Remote access lives in `keggraph-rest`; flat-text parsing in `keggraph-flatfile`.

pub mod error;
pub mod graph;
pub mod mapper;
pub mod pathway;
pub mod shared;
pub mod sink;

pub use error::{
    Diagnostic, EquationShapeError, GraphDecodeError, RecordParseError, Resolved, UnresolvedReference,
};
pub use graph::{
    AnnotationCategory, AnnotationSet, Colors, EdgeKind, Geometry, GraphEdge, GraphNode,
    LabelIndex, NodeKind, PathwayGraph,
};
pub use mapper::map_pathway;
pub use pathway::{
    EntryRecord, Graphics, PathwayDescription, ReactionRecord, RelationRecord, GLOBAL_MAP_NUMBER,
};
pub use shared::SharedGraph;
pub use sink::{export, AttributeValue, GraphSink, TableSink};
