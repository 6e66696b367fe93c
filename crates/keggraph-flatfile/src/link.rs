//! Tab-delimited link tables (`hsa:10327\tko:K00002`).

use std::collections::BTreeSet;

use keggraph_core::{Diagnostic, RecordParseError, Resolved};

/// One `source\ttarget` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source: String,
    pub target: String,
}

pub fn parse_link_line(line: &str) -> Result<Link, RecordParseError> {
    let mut cols = line.trim().split('\t');
    match (cols.next(), cols.next()) {
        (Some(source), Some(target)) if !source.trim().is_empty() && !target.trim().is_empty() => Ok(Link {
            source: source.trim().to_string(),
            target: target.trim().to_string(),
        }),
        _ => Err(RecordParseError::new(
            "link line",
            "expected two tab-separated columns",
            line,
        )),
    }
}

/// Second-column values of a link table, deduplicated. Blank lines are
/// ignored; malformed lines are reported and skipped.
pub fn link_targets(text: &str) -> Resolved<BTreeSet<String>> {
    let mut targets = BTreeSet::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match parse_link_line(line) {
            Ok(link) => {
                targets.insert(link.target);
            }
            Err(e) => diagnostics.push(e.into()),
        }
    }
    Resolved::with_diagnostics(targets, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_unique_targets() {
        let table = "hsa:10327\tko:K00002\nhsa:124\tko:K13951\nhsa:125\tko:K13951\n\n";
        let r = link_targets(table);
        assert!(r.is_clean());
        assert_eq!(
            r.value.into_iter().collect::<Vec<_>>(),
            ["ko:K00002", "ko:K13951"]
        );
    }

    #[test]
    fn empty_table_is_empty_set() {
        let r = link_targets("\n");
        assert!(r.value.is_empty());
        assert!(r.is_clean());
    }

    #[test]
    fn line_without_tab_is_reported() {
        let r = link_targets("g1\torth1\nnot a link line\n");
        assert_eq!(r.value.len(), 1);
        assert_eq!(r.diagnostics.len(), 1);
    }
}
