//! Relation type definitions.
//!
//! A relation is a subject-predicate-object assertion, optionally anchored
//! to a temporal and/or spatial context entity.

use serde::{Deserialize, Serialize};

/// A relation as extracted from a single document. All entity references
/// are document-scoped ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalRelation {
    /// Local id of the subject entity.
    pub subject: String,
    /// Free-text predicate (e.g., "capitulated_to", "located_in").
    pub predicate: String,
    /// Local id of the object entity.
    pub object: String,
    /// Extraction confidence in [0, 1].
    pub confidence: f64,
    /// Local id of a TIME entity anchoring the assertion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_time: Option<String>,
    /// Local id of a LOCATION entity anchoring the assertion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_location: Option<String>,
}

/// A deduplicated cross-document relation. All entity references are global
/// ids, guaranteed to exist in the entity store. Serialize-only, as part of
/// the exported graph.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalRelation {
    /// Stable relation id ("R" + 11 hex chars of the signature hash).
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Highest confidence among contributing assertions.
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_location: Option<String>,
    /// Ids of the documents that asserted this relation, in integration order.
    pub sources: Vec<String>,
}

impl GlobalRelation {
    /// Record a contributing document, keeping `sources` duplicate-free.
    pub fn add_source(&mut self, document_id: &str) {
        if !self.sources.iter().any(|s| s == document_id) {
            self.sources.push(document_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_relation_optional_context() {
        let json = r#"{"subject":"E1","predicate":"capitulation","object":"E2","confidence":0.7}"#;
        let relation: LocalRelation = serde_json::from_str(json).unwrap();
        assert!(relation.context_time.is_none());
        assert!(relation.context_location.is_none());

        let out = serde_json::to_string(&relation).unwrap();
        assert!(!out.contains("context_time"));
    }

    #[test]
    fn test_global_relation_add_source() {
        let mut relation = GlobalRelation {
            id: "Rabc".into(),
            subject: "s".into(),
            predicate: "p".into(),
            object: "o".into(),
            confidence: 0.5,
            context_time: None,
            context_location: None,
            sources: vec![],
        };
        relation.add_source("doc1");
        relation.add_source("doc1");
        assert_eq!(relation.sources, vec!["doc1"]);
    }
}
