//! The process-wide entity/relation store.
//!
//! One owned, append/merge-only accumulator for a whole integration run.
//! Entities and relations keep their insertion order; similarity and dedup
//! lookups are linear scans in that order, first match wins, so match
//! outcomes depend on the order documents are fed in. Callers serialize
//! `integrate_document` calls and pick a deterministic document order.

use std::collections::HashMap;

use gazette_core::{GlobalEntity, GlobalRelation, IntegratorConfig};

use crate::relations::signature_of;
use crate::similarity::{entities_similar, EntityView};

/// In-memory accumulator for global entities, relations, and the
/// local→global id mapping.
#[derive(Debug, Default)]
pub struct GraphStore {
    entities: Vec<GlobalEntity>,
    entity_index: HashMap<String, usize>,
    relations: Vec<GlobalRelation>,
    /// (document_id, local_id) → global_id.
    id_map: HashMap<(String, String), String>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scan over global entities in insertion order; the first one
    /// the similarity predicate accepts wins.
    pub fn find_similar(&self, candidate: &EntityView, config: &IntegratorConfig) -> Option<&str> {
        self.entities
            .iter()
            .find(|entity| entities_similar(&EntityView::global(entity), candidate, config))
            .map(|entity| entity.id.as_str())
    }

    pub fn contains_entity(&self, global_id: &str) -> bool {
        self.entity_index.contains_key(global_id)
    }

    pub fn entity_mut(&mut self, global_id: &str) -> Option<&mut GlobalEntity> {
        let index = *self.entity_index.get(global_id)?;
        self.entities.get_mut(index)
    }

    /// Append a new entity. The id must not already be present.
    pub fn push_entity(&mut self, entity: GlobalEntity) {
        debug_assert!(!self.entity_index.contains_key(&entity.id));
        self.entity_index.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
    }

    /// Record the local→global mapping for one document-scoped entity id.
    pub fn map_local(&mut self, document_id: &str, local_id: &str, global_id: String) {
        self.id_map
            .insert((document_id.to_string(), local_id.to_string()), global_id);
    }

    /// Resolve a document-scoped id to its global id, if that entity was
    /// integrated.
    pub fn resolve(&self, document_id: &str, local_id: &str) -> Option<&str> {
        self.id_map
            .get(&(document_id.to_string(), local_id.to_string()))
            .map(String::as_str)
    }

    /// Linear scan for a stored relation with the same dedup signature.
    pub fn find_relation_mut(&mut self, signature: &str) -> Option<&mut GlobalRelation> {
        self.relations
            .iter_mut()
            .find(|relation| signature_of(relation) == signature)
    }

    pub fn push_relation(&mut self, relation: GlobalRelation) {
        self.relations.push(relation);
    }

    /// Global entities in creation order.
    pub fn entities(&self) -> &[GlobalEntity] {
        &self.entities
    }

    /// Global relations in creation order.
    pub fn relations(&self) -> &[GlobalRelation] {
        &self.relations
    }

    pub fn into_parts(self) -> (Vec<GlobalEntity>, Vec<GlobalRelation>) {
        (self.entities, self.relations)
    }
}
