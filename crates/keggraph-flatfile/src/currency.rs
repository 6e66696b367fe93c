//! Currency compounds: cofactors excluded from inferred compound-pair edges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use keggraph_core::graph::strip_db_prefix;

/// Water, ATP, NAD+, NADH, NADPH, NADP+, ADP, CoA.
pub const DEFAULT_CURRENCY_COMPOUNDS: [&str; 8] = [
    "C00001", "C00002", "C00003", "C00004", "C00005", "C00006", "C00008", "C00010",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySet {
    ids: BTreeSet<String>,
}

impl Default for CurrencySet {
    fn default() -> Self {
        Self::from_ids(DEFAULT_CURRENCY_COMPOUNDS)
    }
}

impl CurrencySet {
    pub fn empty() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(ids);
        set
    }

    /// Add compounds; `cpd:` prefixes are dropped.
    pub fn extend<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ids
            .extend(ids.into_iter().map(|s| strip_db_prefix(s.as_ref().trim()).to_string()));
    }

    pub fn contains(&self, compound_id: &str) -> bool {
        self.ids.contains(strip_db_prefix(compound_id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
