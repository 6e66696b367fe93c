//! Pathway-level annotation resolution.

use std::collections::BTreeMap;
use tracing::{debug, info};

use keggraph_core::{AnnotationCategory, AnnotationSet, Diagnostic, Resolved};
use keggraph_flatfile::{annotations_from_fields, annotations_from_record, module_ids, module_reaction_ids, parse_records};

use crate::client::KeggRest;
use crate::db::{DatabaseType, FieldType};
use crate::error::Result;
use crate::fetch::Fetch;

/// The per-field service field holding each annotation category.
pub const ANNOTATION_FIELDS: [(AnnotationCategory, FieldType); 4] = [
    (AnnotationCategory::Module, FieldType::Modules),
    (AnnotationCategory::Disease, FieldType::Diseases),
    (AnnotationCategory::DbLink, FieldType::DbLinks),
    (AnnotationCategory::RelatedPathway, FieldType::RelPathways),
];

impl<F: Fetch> KeggRest<F> {
    /// Fetch the four annotation fields of `pathway_id`, then the REACTION
    /// field of every module they name.
    pub fn resolve_annotations(&self, pathway_id: &str) -> Result<AnnotationSet> {
        let mut bodies = Vec::with_capacity(ANNOTATION_FIELDS.len());
        for (category, field) in ANNOTATION_FIELDS {
            let body = self.entry_field(DatabaseType::Pathway, pathway_id, field)?;
            bodies.push((category, body));
        }
        let mut set = annotations_from_fields(bodies.iter().map(|(c, b)| (*c, Some(b.as_str()))));
        self.attach_module_reactions(&mut set)?;
        info!(
            pathway = pathway_id,
            modules = set.get(AnnotationCategory::Module).len(),
            diseases = set.get(AnnotationCategory::Disease).len(),
            dblinks = set.get(AnnotationCategory::DbLink).len(),
            related = set.get(AnnotationCategory::RelatedPathway).len(),
            "resolved annotations"
        );
        Ok(set)
    }

    /// Module ID -> reaction IDs, one REACTION field request per module.
    pub fn resolve_module_reactions<S: AsRef<str>>(
        &self,
        module_ids: &[S],
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let mut reactions = BTreeMap::new();
        for id in module_ids {
            let id = id.as_ref();
            let body = self.entry_field(DatabaseType::Module, id, FieldType::Reactions)?;
            let ids = module_reaction_ids(&body);
            debug!(module = id, reactions = ids.len(), "module reactions");
            reactions.insert(id.to_string(), ids);
        }
        Ok(reactions)
    }

    /// Annotations from the whole pathway flat record in one request.
    ///
    /// Yields the same set as [`resolve_annotations`](Self::resolve_annotations)
    /// for the same remote data.
    pub fn resolve_annotations_from_record(&self, pathway_id: &str) -> Result<Resolved<AnnotationSet>> {
        let text = self.entry(DatabaseType::Pathway, pathway_id)?;
        let (records, errors) = parse_records(&text);
        let diagnostics: Vec<Diagnostic> = errors.into_iter().map(Into::into).collect();
        let mut set = records
            .first()
            .map(annotations_from_record)
            .unwrap_or_default();
        self.attach_module_reactions(&mut set)?;
        Ok(Resolved::with_diagnostics(set, diagnostics))
    }

    fn attach_module_reactions(&self, set: &mut AnnotationSet) -> Result<()> {
        let modules = module_ids(set.get(AnnotationCategory::Module));
        for (module, reactions) in self.resolve_module_reactions(&modules)? {
            set.extend_module_reactions(&module, reactions);
        }
        Ok(())
    }
}
