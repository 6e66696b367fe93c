//! Pathway-level annotation fields (modules, diseases, db links, related pathways).

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use keggraph_core::{AnnotationCategory, AnnotationSet};

use crate::record::{field_lines, FlatRecord};

fn module_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Organism pathways prefix the ID (`hsa_M00001`), and `_` is a word character.
    RE.get_or_init(|| Regex::new(r"(?:^|[^A-Za-z0-9])(M\d{5})\b").expect("valid module regex"))
}

fn reaction_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bR\d{5}\b").expect("valid reaction regex"))
}

/// Flat-file tag holding each category in a full pathway record.
pub fn category_tag(category: AnnotationCategory) -> &'static str {
    match category {
        AnnotationCategory::Module => "MODULE",
        AnnotationCategory::Disease => "DISEASE",
        AnnotationCategory::DbLink => "DBLINKS",
        AnnotationCategory::RelatedPathway => "REL_PATHWAY",
    }
}

/// Module IDs named by module annotation lines, first per line, in order.
pub fn module_ids(lines: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter_map(|l| module_id_re().captures(l))
        .map(|c| c[1].to_string())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Reaction IDs of a module REACTION field.
///
/// Each line starts with a comma/plus separated reaction list followed by
/// the compound conversion (`R01786,R02189  C00267 -> C00668`); only the
/// leading list is read.
pub fn module_reaction_ids(field_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for line in field_lines(field_text) {
        let Some(head) = line.split_whitespace().next() else {
            continue;
        };
        for m in reaction_id_re().find_iter(head) {
            if seen.insert(m.as_str().to_string()) {
                ids.push(m.as_str().to_string());
            }
        }
    }
    ids
}

/// Annotation set from per-category field bodies; `None` means the remote
/// record lacks that tag and yields an empty list.
pub fn annotations_from_fields<'a>(
    fields: impl IntoIterator<Item = (AnnotationCategory, Option<&'a str>)>,
) -> AnnotationSet {
    let mut set = AnnotationSet::default();
    for (category, body) in fields {
        set.extend(category, field_lines(body.unwrap_or("")));
    }
    set
}

/// Annotation set from an already-fetched full pathway record.
pub fn annotations_from_record(record: &FlatRecord) -> AnnotationSet {
    let mut set = AnnotationSet::default();
    for category in AnnotationCategory::ALL {
        set.extend(category, record.lines(category_tag(category)).iter().cloned());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::split_fields;

    const MAP00010: &str = "\
ENTRY       map00010                    Pathway
NAME        Glycolysis / Gluconeogenesis
MODULE      M00001  Glycolysis (Embden-Meyerhof pathway), glucose => pyruvate [PATH:map00010]
            M00002  Glycolysis, core module involving three-carbon compounds [PATH:map00010]
DISEASE     H00069  Glycogen storage disease
DBLINKS     GO: 0006096 0006094
REL_PATHWAY map00020  Citrate cycle (TCA cycle)
            map00030  Pentose phosphate pathway
";

    #[test]
    fn record_annotations_keep_lines_verbatim() {
        let (record, errors) = split_fields(MAP00010);
        assert!(errors.is_empty());
        let set = annotations_from_record(&record);
        assert_eq!(set.get(AnnotationCategory::Module).len(), 2);
        assert_eq!(set.get(AnnotationCategory::Disease), ["H00069  Glycogen storage disease"]);
        assert_eq!(set.get(AnnotationCategory::DbLink), ["GO: 0006096 0006094"]);
        assert_eq!(
            set.get(AnnotationCategory::RelatedPathway),
            ["map00020  Citrate cycle (TCA cycle)", "map00030  Pentose phosphate pathway"]
        );
    }

    #[test]
    fn module_ids_take_first_id_per_line() {
        let lines = vec![
            "M00001  Glycolysis [PATH:map00010]".to_string(),
            "map00010_M00002  Glycolysis core".to_string(),
            "M00001  duplicate".to_string(),
            "no module here".to_string(),
        ];
        assert_eq!(module_ids(&lines), ["M00001", "M00002"]);
    }

    #[test]
    fn organism_module_lines_yield_ids() {
        let lines = vec![
            "hsa_M00001  Glycolysis (Embden-Meyerhof pathway), glucose => pyruvate [PATH:hsa00010]".to_string(),
            "hsa_M00002  Glycolysis, core module involving three-carbon compounds [PATH:hsa00010]".to_string(),
            "XM00003  not a module".to_string(),
        ];
        assert_eq!(module_ids(&lines), ["M00001", "M00002"]);
    }

    #[test]
    fn module_reactions_read_the_leading_list() {
        let field = "\
R01786,R02189,R09085  C00267 -> C00668
R02740  C00668 -> C05345
R04779+R01070  C05345 -> C05378
R00756  C05378 -> C00111 R00000
";
        assert_eq!(
            module_reaction_ids(field),
            ["R01786", "R02189", "R09085", "R02740", "R04779", "R01070", "R00756"]
        );
        assert!(module_reaction_ids("").is_empty());
    }

    #[test]
    fn missing_fields_are_empty_lists() {
        let set = annotations_from_fields([
            (AnnotationCategory::Module, Some("M00001  Glycolysis\n\n")),
            (AnnotationCategory::Disease, None),
            (AnnotationCategory::DbLink, Some("")),
        ]);
        assert_eq!(set.get(AnnotationCategory::Module), ["M00001  Glycolysis"]);
        assert!(set.get(AnnotationCategory::Disease).is_empty());
        assert!(set.get(AnnotationCategory::DbLink).is_empty());
    }
}
