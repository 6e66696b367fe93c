use keggraph_core::AnnotationCategory;
use keggraph_rest::{KeggRest, RestConfig, StaticFetch};
use proptest::prelude::*;

const TOGOWS: &str = "http://togows.dbcls.jp/entry/";
const KEGG: &str = "https://rest.kegg.jp/";

fn annotation_fetch(modules: &str, diseases: &str, dblinks: &str, related: &str) -> StaticFetch {
    let mut fetch = StaticFetch::new()
        .with(format!("{TOGOWS}kegg-pathway/map00010/modules"), modules)
        .with(format!("{TOGOWS}kegg-pathway/map00010/diseases"), diseases)
        .with(format!("{TOGOWS}kegg-pathway/map00010/dblinks"), dblinks)
        .with(format!("{TOGOWS}kegg-pathway/map00010/relpathways"), related);
    for i in 0..100 {
        fetch.insert(
            format!("{TOGOWS}kegg-module/M{:05}/reactions", i),
            format!("R{:05}  C00001 -> C00002\n", i),
        );
    }
    fetch
}

fn field_text() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z0-9 :]{0,12}", 0..6).prop_map(|lines| lines.join("\n"))
}

fn module_text() -> impl Strategy<Value = String> {
    proptest::collection::vec((0u32..100, "[a-z ]{0,10}"), 0..5).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(i, name)| format!("M{:05}  {name}", i))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn annotations_are_idempotent_and_duplicate_free(
        modules in module_text(),
        diseases in field_text(),
        dblinks in field_text(),
        related in field_text(),
    ) {
        let rest = KeggRest::new(
            annotation_fetch(&modules, &diseases, &dblinks, &related),
            &RestConfig::default(),
        ).unwrap();
        let first = rest.resolve_annotations("map00010").unwrap();
        let second = rest.resolve_annotations("map00010").unwrap();
        prop_assert_eq!(&first, &second);

        for category in AnnotationCategory::ALL {
            let list = first.get(category);
            let mut unique = list.to_vec();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), list.len());
            prop_assert!(list.iter().all(|l| !l.is_empty() && l.trim() == l));
        }

        let mut merged = first.clone();
        merged.merge(second);
        prop_assert_eq!(merged, first);
    }
}

#[test]
fn orthology_chain_uses_link_tables() {
    let fetch = StaticFetch::new()
        .with(format!("{KEGG}link/orthology/g1"), "g1\torth1\n")
        .with(format!("{KEGG}link/reaction/orth1"), "orth1\trxn1\n");
    let rest = KeggRest::new(fetch, &RestConfig::default()).unwrap();
    let reactions = rest.resolve_reaction_ids(["g1"]).unwrap().value;
    assert_eq!(reactions.len(), 1);
    assert!(reactions.contains("rxn1"));
}

#[test]
fn malformed_link_lines_are_reported_not_fatal() {
    let fetch = StaticFetch::new()
        .with(format!("{KEGG}link/orthology/g1+g2"), "g1\torth1\ng2 orth2\n")
        .with(format!("{KEGG}link/reaction/orth1"), "orth1\trxn1\n");
    let rest = KeggRest::new(fetch, &RestConfig::default()).unwrap();
    let resolved = rest.resolve_reaction_ids(["g1", "g2"]).unwrap();
    assert_eq!(resolved.value.len(), 1);
    assert_eq!(resolved.diagnostics.len(), 1);
}
