//! KEGG flat-file parsing.
//!
//! Pure text -> data functions; nothing here performs I/O. Fetching the text
//! is `keggraph-rest`'s job.
//!
//! - [`record`]: `///`-separated records split into tagged fields
//! - [`equation`]: `A + B <=> C + D`
//! - [`pair`]: RPAIR sub-lines and compound-pair edge synthesis
//! - [`currency`]: cofactors excluded from compound-pair edges
//! - [`link`]: tab-delimited link tables
//! - [`annotation`]: module/disease/dblink/related-pathway fields

pub mod annotation;
pub mod currency;
pub mod equation;
pub mod link;
pub mod pair;
pub mod record;

pub use annotation::{
    annotations_from_fields, annotations_from_record, category_tag, module_ids,
    module_reaction_ids,
};
pub use currency::{CurrencySet, DEFAULT_CURRENCY_COMPOUNDS};
pub use equation::{parse_equation, Equation, EQUATION_ARROW};
pub use link::{link_targets, parse_link_line, Link};
pub use pair::{decode_pair_line, decode_pairs, resolve_pairs, CompoundPair, MAIN_CATEGORY, PAIR_TAGS};
pub use record::{
    field_lines, parse_records, split_fields, split_records, Field, FlatRecord, RECORD_TERMINATOR,
};
