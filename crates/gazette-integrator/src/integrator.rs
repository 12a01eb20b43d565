//! The integration orchestrator.
//!
//! Drives identity assignment, similarity matching, attribute merging, and
//! relation resolution over an ordered batch of per-document records,
//! accumulating everything in one owned `GraphStore`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gazette_core::{
    DocumentRecord, EntityType, GazetteResult, GlobalEntity, GlobalRelation, IntegratorConfig,
    LocalEntity, LocationAttributes, TimeAttributes,
};

use crate::export;
use crate::identity::global_entity_id;
use crate::merge::{merge_entity_core, merge_location, merge_time};
use crate::relations::{integrate_relation, RelationOutcome};
use crate::similarity::EntityView;
use crate::store::GraphStore;
use crate::validate::ValidationReport;

/// Per-document integration counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Entities merged into an existing global entity.
    pub entities_matched: usize,
    /// Entities that created a new global entity.
    pub entities_created: usize,
    pub relations_added: usize,
    pub relations_merged: usize,
    pub relations_dropped: usize,
}

/// The finalized merged graph, in creation order. Serialize-only, like the
/// entity and relation records it holds.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeGraph {
    pub entities: Vec<GlobalEntity>,
    pub relations: Vec<GlobalRelation>,
}

/// Integrates per-document extractions into one deduplicated graph.
///
/// Documents must be fed in a deterministic, caller-chosen order; matching
/// is first-match-wins over the store in insertion order, so input order
/// shapes the output graph.
#[derive(Debug, Default)]
pub struct Integrator {
    store: GraphStore,
    config: IntegratorConfig,
}

impl Integrator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            store: GraphStore::new(),
            config,
        }
    }

    /// Integrate one document's entities and relations into the store.
    pub fn integrate_document(
        &mut self,
        document_id: &str,
        record: &DocumentRecord,
    ) -> DocumentStats {
        debug!(
            document_id,
            entities = record.entities.len(),
            relations = record.relations.len(),
            locations = record.locations.len(),
            timeperiods = record.timeperiods.len(),
            "integrating document"
        );

        // Index the side tables by local entity id.
        let location_map: HashMap<&str, &LocationAttributes> = record
            .locations
            .iter()
            .map(|row| (row.entity_id.as_str(), &row.attributes))
            .collect();
        let time_map: HashMap<&str, &TimeAttributes> = record
            .timeperiods
            .iter()
            .map(|row| (row.entity_id.as_str(), &row.attributes))
            .collect();

        let mut stats = DocumentStats::default();

        for entity in &record.entities {
            let location = (entity.entity_type == EntityType::Location)
                .then(|| location_map.get(entity.id.as_str()).copied())
                .flatten();
            let time = (entity.entity_type == EntityType::Time)
                .then(|| time_map.get(entity.id.as_str()).copied())
                .flatten();

            let candidate = EntityView::local(entity, location, time);
            let matched = self
                .store
                .find_similar(&candidate, &self.config)
                .map(str::to_string);

            let global_id = match matched {
                Some(global_id) => {
                    self.merge_into(&global_id, document_id, entity, location, time);
                    stats.entities_matched += 1;
                    global_id
                }
                None => {
                    let global_id =
                        global_entity_id(entity.entity_type, entity.best_text(), location, time);
                    if self.store.contains_entity(&global_id) {
                        // Identical signature: the hash collision is the
                        // intended merge trigger.
                        self.merge_into(&global_id, document_id, entity, location, time);
                        stats.entities_matched += 1;
                    } else {
                        self.store.push_entity(GlobalEntity {
                            id: global_id.clone(),
                            entity_type: entity.entity_type,
                            text: entity.text.clone(),
                            normalized: entity.normalized.clone(),
                            confidence: entity.confidence,
                            sources: vec![document_id.to_string()],
                            location: location.cloned(),
                            time: time.cloned(),
                        });
                        stats.entities_created += 1;
                    }
                    global_id
                }
            };
            self.store.map_local(document_id, &entity.id, global_id);
        }

        for relation in &record.relations {
            match integrate_relation(&mut self.store, document_id, relation) {
                RelationOutcome::Added => stats.relations_added += 1,
                RelationOutcome::Merged => stats.relations_merged += 1,
                RelationOutcome::Dropped => stats.relations_dropped += 1,
            }
        }

        info!(
            document_id,
            entities_matched = stats.entities_matched,
            entities_created = stats.entities_created,
            relations_added = stats.relations_added,
            relations_merged = stats.relations_merged,
            relations_dropped = stats.relations_dropped,
            "document integrated"
        );
        stats
    }

    fn merge_into(
        &mut self,
        global_id: &str,
        document_id: &str,
        entity: &LocalEntity,
        location: Option<&LocationAttributes>,
        time: Option<&TimeAttributes>,
    ) {
        let global = self
            .store
            .entity_mut(global_id)
            .expect("matched id must be in the store");

        global.add_source(document_id);
        merge_entity_core(global, entity);

        if let Some(attrs) = location {
            merge_location(global.location.get_or_insert_with(Default::default), attrs);
        }
        if let Some(attrs) = time {
            merge_time(global.time.get_or_insert_with(Default::default), attrs);
        }
    }

    /// Compute aggregate data-quality statistics without mutating state.
    pub fn validate(&self) -> ValidationReport {
        ValidationReport::compute(&self.store)
    }

    /// Write the merged graph as a pretty-printed JSON file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> GazetteResult<()> {
        export::write_graph_json(&self.store, path)
    }

    /// Write the four Neo4j bulk-import CSV files into a directory.
    pub fn write_neo4j_csv(&self, dir: impl AsRef<Path>) -> GazetteResult<()> {
        export::write_neo4j_csv(&self.store, dir)
    }

    /// Direct access to the accumulated store.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Consume the integrator and hand back the merged graph. No further
    /// integration is possible afterwards.
    pub fn finalize(self) -> KnowledgeGraph {
        let (entities, relations) = self.store.into_parts();
        KnowledgeGraph {
            entities,
            relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::TimePrecision;

    fn record(json: &str) -> DocumentRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_same_entity_across_documents_merges() {
        let mut integrator = Integrator::new(IntegratorConfig::default());

        let doc = record(
            r#"{"entities":[{"id":"E1","type":"PERSON","text":"French troops","confidence":0.8}]}"#,
        );
        let stats1 = integrator.integrate_document("doc1", &doc);
        let stats2 = integrator.integrate_document("doc2", &doc);

        assert_eq!(stats1.entities_created, 1);
        assert_eq!(stats2.entities_matched, 1);

        let graph = integrator.finalize();
        assert_eq!(graph.entities.len(), 1);
        assert_eq!(graph.entities[0].sources, vec!["doc1", "doc2"]);
    }

    #[test]
    fn test_relation_dedup_across_documents() {
        let mut integrator = Integrator::new(IntegratorConfig::default());

        let doc1 = record(
            r#"{"entities":[{"id":"E1","type":"PERSON","text":"French troops","confidence":0.8},
                            {"id":"E2","type":"LOCATION","text":"Vienna","confidence":0.9}],
                "relations":[{"subject":"E1","predicate":"capitulation","object":"E2","confidence":0.6}]}"#,
        );
        let doc2 = record(
            r#"{"entities":[{"id":"X9","type":"PERSON","text":"French troops","confidence":0.7},
                            {"id":"X7","type":"LOCATION","text":"Vienna","confidence":0.9}],
                "relations":[{"subject":"X9","predicate":"capitulation","object":"X7","confidence":0.9}]}"#,
        );

        let stats1 = integrator.integrate_document("doc1", &doc1);
        let stats2 = integrator.integrate_document("doc2", &doc2);
        assert_eq!(stats1.relations_added, 1);
        assert_eq!(stats2.relations_merged, 1);

        let graph = integrator.finalize();
        assert_eq!(graph.relations.len(), 1);
        let relation = &graph.relations[0];
        assert_eq!(relation.sources, vec!["doc1", "doc2"]);
        assert_eq!(relation.confidence, 0.9);
        assert!(relation.id.starts_with('R'));
    }

    #[test]
    fn test_dangling_relation_is_dropped() {
        let mut integrator = Integrator::new(IntegratorConfig::default());
        let doc = record(
            r#"{"entities":[{"id":"E1","type":"PERSON","text":"Napoleon","confidence":0.9}],
                "relations":[{"subject":"E1","predicate":"entered","object":"E99","confidence":0.5}]}"#,
        );
        let stats = integrator.integrate_document("doc1", &doc);
        assert_eq!(stats.relations_dropped, 1);
        assert!(integrator.finalize().relations.is_empty());
    }

    #[test]
    fn test_unresolved_context_is_omitted_not_fatal() {
        let mut integrator = Integrator::new(IntegratorConfig::default());
        let doc = record(
            r#"{"entities":[{"id":"E1","type":"PERSON","text":"Napoleon","confidence":0.9},
                            {"id":"E2","type":"LOCATION","text":"Vienna","confidence":0.9}],
                "relations":[{"subject":"E1","predicate":"entered","object":"E2",
                              "confidence":0.5,"context_time":"E42"}]}"#,
        );
        let stats = integrator.integrate_document("doc1", &doc);
        assert_eq!(stats.relations_added, 1);

        let graph = integrator.finalize();
        assert!(graph.relations[0].context_time.is_none());
    }

    #[test]
    fn test_duplicate_mentions_within_one_document_merge() {
        let mut integrator = Integrator::new(IntegratorConfig::default());
        let doc = record(
            r#"{"entities":[
                {"id":"E1","type":"CONCEPT","text":"liberty","normalized":"freedom of the press","confidence":0.5},
                {"id":"E2","type":"CONCEPT","text":"press freedoms","normalized":"Freedom of the Press","confidence":0.9}]}"#,
        );
        let stats = integrator.integrate_document("doc1", &doc);

        assert_eq!(stats.entities_created, 1);
        assert_eq!(stats.entities_matched, 1);
        let graph = integrator.finalize();
        assert_eq!(graph.entities.len(), 1);
        assert_eq!(graph.entities[0].confidence, 0.9);
    }

    #[test]
    fn test_time_entities_merge_on_date_and_upgrade_precision() {
        let mut integrator = Integrator::new(IntegratorConfig::default());
        let doc1 = record(
            r#"{"entities":[{"id":"T1","type":"TIME","text":"in 1915","confidence":0.7}],
                "timeperiods":[{"entity_id":"T1","precision":"YEAR","type":"PERIOD",
                                "start_date":"1915-04-04","date_reliability":0.4}]}"#,
        );
        let doc2 = record(
            r#"{"entities":[{"id":"T1","type":"TIME","text":"4 April 1915","confidence":0.9}],
                "timeperiods":[{"entity_id":"T1","precision":"DAY","type":"POINT",
                                "start_date":"1915-04-04","end_date":"1915-04-04",
                                "date_reliability":0.9}]}"#,
        );

        integrator.integrate_document("doc1", &doc1);
        integrator.integrate_document("doc2", &doc2);

        let graph = integrator.finalize();
        assert_eq!(graph.entities.len(), 1);
        let time = graph.entities[0].time.as_ref().unwrap();
        assert_eq!(time.precision, Some(TimePrecision::Day));
        assert_eq!(time.date_reliability, Some(0.9));
    }

    #[test]
    fn test_matched_entity_without_bag_gains_one() {
        let mut integrator = Integrator::new(IntegratorConfig::default());
        // First mention of Vienna failed geocoding; second brings coordinates.
        let doc1 = record(
            r#"{"entities":[{"id":"E1","type":"LOCATION","text":"Vienna","confidence":0.8}]}"#,
        );
        let doc2 = record(
            r#"{"entities":[{"id":"E1","type":"LOCATION","text":"Vienna","confidence":0.7}],
                "locations":[{"entity_id":"E1","latitude":48.2082,"longitude":16.3738}]}"#,
        );

        integrator.integrate_document("doc1", &doc1);
        integrator.integrate_document("doc2", &doc2);

        let graph = integrator.finalize();
        assert_eq!(graph.entities.len(), 1);
        let location = graph.entities[0].location.as_ref().unwrap();
        assert_eq!(location.latitude, Some(48.2082));
    }
}
