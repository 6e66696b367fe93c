//! Database/field vocabularies and URL construction.

use std::fmt;
use url::Url;

use keggraph_core::graph::strip_db_prefix;

use crate::config::{base_url, ConfigError, RestConfig};

/// Databases of the per-field entry service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    Compound,
    Pathway,
    Module,
    Reaction,
}

impl DatabaseType {
    pub fn path_segment(self) -> &'static str {
        match self {
            DatabaseType::Compound => "compound",
            DatabaseType::Pathway => "kegg-pathway",
            DatabaseType::Module => "kegg-module",
            DatabaseType::Reaction => "reaction",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Fields of the per-field entry service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Diseases,
    DbLinks,
    RelPathways,
    Modules,
    Name,
    Reactions,
    Equation,
}

impl FieldType {
    pub fn path_segment(self) -> &'static str {
        match self {
            FieldType::Diseases => "diseases",
            FieldType::DbLinks => "dblinks",
            FieldType::RelPathways => "relpathways",
            FieldType::Modules => "modules",
            FieldType::Name => "name",
            FieldType::Reactions => "reactions",
            FieldType::Equation => "equation",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Target databases of KEGG REST `link` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDatabase {
    Orthology,
    Reaction,
}

impl LinkDatabase {
    pub fn path_segment(self) -> &'static str {
        match self {
            LinkDatabase::Orthology => "orthology",
            LinkDatabase::Reaction => "reaction",
        }
    }
}

/// URL builder over the two configured base addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    togows: Url,
    kegg: Url,
}

impl Endpoints {
    pub fn new(config: &RestConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            togows: base_url("togows_base_url", &config.togows_base_url)?,
            kegg: base_url("kegg_base_url", &config.kegg_base_url)?,
        })
    }

    /// `{togows}{db}/{id}/{field}`; the ID loses any `db:` prefix
    /// (`path:map00010` -> `map00010`).
    pub fn field(&self, db: DatabaseType, id: &str, field: FieldType) -> String {
        join(
            &self.togows,
            &[db.path_segment(), strip_db_prefix(id.trim()), field.path_segment()],
        )
    }

    /// `{togows}{db}/{id}`: the whole flat record.
    pub fn entry(&self, db: DatabaseType, id: &str) -> String {
        join(&self.togows, &[db.path_segment(), strip_db_prefix(id.trim())])
    }

    /// `{kegg}get/{id+id+...}`.
    pub fn get<S: AsRef<str>>(&self, ids: &[S]) -> String {
        join(&self.kegg, &["get", &plus_joined(ids)])
    }

    /// `{kegg}link/{target}/{id+id+...}`.
    pub fn link<S: AsRef<str>>(&self, target: LinkDatabase, ids: &[S]) -> String {
        join(&self.kegg, &["link", target.path_segment(), &plus_joined(ids)])
    }

    /// `{kegg}get/{pathway}/kgml`.
    pub fn kgml(&self, pathway_id: &str) -> String {
        join(&self.kegg, &["get", strip_db_prefix(pathway_id.trim()), "kgml"])
    }
}

fn plus_joined<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|s| s.as_ref().trim())
        .collect::<Vec<_>>()
        .join("+")
}

fn join(base: &Url, segments: &[&str]) -> String {
    let mut url = base.clone();
    // Bases are checked by `base_url`, so they always take segments.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(&RestConfig::default()).unwrap()
    }

    #[test]
    fn field_urls_use_path_segments() {
        let e = endpoints();
        assert_eq!(
            e.field(DatabaseType::Pathway, "path:map00010", FieldType::Modules),
            "http://togows.dbcls.jp/entry/kegg-pathway/map00010/modules"
        );
        assert_eq!(
            e.field(DatabaseType::Compound, "cpd:C00022", FieldType::Name),
            "http://togows.dbcls.jp/entry/compound/C00022/name"
        );
        assert_eq!(
            e.entry(DatabaseType::Pathway, "map00010"),
            "http://togows.dbcls.jp/entry/kegg-pathway/map00010"
        );
    }

    #[test]
    fn kegg_urls_join_ids_with_plus() {
        let e = endpoints();
        assert_eq!(e.get(&["rn:R00209", "rn:R00200"]), "https://rest.kegg.jp/get/rn:R00209+rn:R00200");
        assert_eq!(
            e.link(LinkDatabase::Orthology, &["hsa:10327"]),
            "https://rest.kegg.jp/link/orthology/hsa:10327"
        );
        assert_eq!(e.kgml("path:hsa00010"), "https://rest.kegg.jp/get/hsa00010/kgml");
    }

    #[test]
    fn base_without_trailing_slash_still_joins() {
        let config = RestConfig {
            kegg_base_url: "http://localhost:9000/kegg".to_string(),
            ..RestConfig::default()
        };
        let e = Endpoints::new(&config).unwrap();
        assert_eq!(e.get(&["C00022"]), "http://localhost:9000/kegg/get/C00022");
    }

    #[test]
    fn vocabularies_render_their_segments() {
        assert_eq!(DatabaseType::Module.to_string(), "kegg-module");
        assert_eq!(FieldType::RelPathways.to_string(), "relpathways");
        assert_eq!(LinkDatabase::Reaction.path_segment(), "reaction");
    }
}
