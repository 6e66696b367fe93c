//! The remote-access collaborator handed to every resolver.

use tracing::debug;

use crate::config::{ConfigError, RestConfig};
use crate::db::{DatabaseType, Endpoints, FieldType, LinkDatabase};
use crate::error::{FetchError, ResolveError};
use crate::fetch::{Fetch, RestClient};

/// A fetcher plus the endpoints it talks to.
///
/// Resolution passes are methods on this type (see the `orthology`,
/// `annotations`, `pairs`, `compounds` and `expand` modules). Construct one per
/// import; there is no process-wide instance.
#[derive(Debug)]
pub struct KeggRest<F> {
    fetch: F,
    endpoints: Endpoints,
    max_ids_per_request: usize,
}

impl KeggRest<RestClient> {
    /// HTTP-backed client from `config`.
    pub fn from_config(config: &RestConfig) -> Result<Self, ResolveError> {
        let fetch = RestClient::new(config)?;
        Ok(Self::new(fetch, config)?)
    }
}

impl<F: Fetch> KeggRest<F> {
    pub fn new(fetch: F, config: &RestConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            fetch,
            endpoints: Endpoints::new(config)?,
            max_ids_per_request: config.max_ids_per_request,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    pub fn max_ids_per_request(&self) -> usize {
        self.max_ids_per_request
    }

    pub(crate) fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "fetching");
        self.fetch.fetch(url)
    }

    /// One field of one entry; empty when the entry lacks the field.
    pub fn entry_field(&self, db: DatabaseType, id: &str, field: FieldType) -> Result<String, FetchError> {
        self.fetch_url(&self.endpoints.field(db, id, field))
    }

    /// A whole flat record from the per-field service.
    pub fn entry(&self, db: DatabaseType, id: &str) -> Result<String, FetchError> {
        self.fetch_url(&self.endpoints.entry(db, id))
    }

    /// Flat records for `ids`, requested `max_ids_per_request` at a time and
    /// concatenated in request order.
    pub fn get_entries<S: AsRef<str>>(&self, ids: &[S]) -> Result<String, FetchError> {
        let mut text = String::new();
        for batch in ids.chunks(self.max_ids_per_request) {
            let body = self.fetch_url(&self.endpoints.get(batch))?;
            text.push_str(&body);
            if !body.is_empty() && !body.ends_with('\n') {
                text.push('\n');
            }
        }
        Ok(text)
    }

    /// Link table from `ids` to `target`, as one query.
    pub fn link<S: AsRef<str>>(&self, target: LinkDatabase, ids: &[S]) -> Result<String, FetchError> {
        if ids.is_empty() {
            return Ok(String::new());
        }
        self.fetch_url(&self.endpoints.link(target, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetch;

    #[test]
    fn entries_are_batched() {
        let config = RestConfig {
            max_ids_per_request: 2,
            ..RestConfig::default()
        };
        let fetch = StaticFetch::new()
            .with("https://rest.kegg.jp/get/R1+R2", "ENTRY R1\n///\nENTRY R2\n///")
            .with("https://rest.kegg.jp/get/R3", "ENTRY R3\n///\n");
        let rest = KeggRest::new(fetch, &config).unwrap();
        let text = rest.get_entries(&["R1", "R2", "R3"]).unwrap();
        assert_eq!(text, "ENTRY R1\n///\nENTRY R2\n///\nENTRY R3\n///\n");
        assert_eq!(rest.fetcher().request_count(), 2);
    }

    #[test]
    fn empty_link_query_is_not_sent() {
        let rest = KeggRest::new(StaticFetch::new(), &RestConfig::default()).unwrap();
        let ids: [&str; 0] = [];
        assert_eq!(rest.link(LinkDatabase::Orthology, &ids).unwrap(), "");
        assert_eq!(rest.fetcher().request_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RestConfig {
            max_ids_per_request: 0,
            ..RestConfig::default()
        };
        assert!(KeggRest::new(StaticFetch::new(), &config).is_err());
    }
}
