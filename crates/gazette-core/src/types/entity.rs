//! Entity type definitions.
//!
//! Entities come in two flavors:
//! - `LocalEntity`: as extracted from one document, with a document-scoped id.
//! - `GlobalEntity`: the deduplicated cross-document record, carrying
//!   provenance and merged geo/temporal attribute bags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attributes::{LocationAttributes, TimeAttributes};

/// Entity categories produced by the extraction stage.
///
/// Serializes as the strict SCREAMING wire names; deserializes through
/// [`EntityType::from_str_flexible`] so noisy LLM spellings in input files
/// still parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    /// A person or group of people (e.g., "Napoleon", "French troops").
    Person,
    /// An organization (e.g., "Austrian army", "k.u.k. Kriegsministerium").
    Organization,
    /// A physical place (e.g., "Vienna", "the Danube").
    Location,
    /// An event (e.g., "capitulation", "coronation").
    Event,
    /// An abstract concept or topic.
    Concept,
    /// A temporal expression (e.g., "4 April 1915", "last spring").
    Time,
    /// A man-made object (e.g., "the telegraph", "a cannon").
    Artifact,
    /// An expressed sentiment or opinion.
    Sentiment,
}

impl EntityType {
    /// Parse an entity type from string with flexible matching.
    ///
    /// Handles variations in LLM output like "PERSON", "Person", "per",
    /// "people", etc.
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "person" | "per" | "people" | "individual" | "human" => Some(Self::Person),

            "organization" | "org" | "organisation" | "company" | "institution"
            | "agency" => Some(Self::Organization),

            "location" | "loc" | "place" | "city" | "country" | "region" | "area"
            | "site" => Some(Self::Location),

            "event" | "evt" | "occasion" | "happening" | "occurrence" => Some(Self::Event),

            "concept" | "idea" | "topic" | "theme" | "notion" | "subject" => Some(Self::Concept),

            "time" | "date" | "period" | "timeperiod" | "temporal" => Some(Self::Time),

            "artifact" | "artefact" | "object" | "item" | "thing" => Some(Self::Artifact),

            "sentiment" | "opinion" | "emotion" | "feeling" | "mood" => Some(Self::Sentiment),

            _ => None,
        }
    }

    /// Get all entity type variants.
    pub fn all() -> &'static [EntityType] {
        &[
            Self::Person,
            Self::Organization,
            Self::Location,
            Self::Event,
            Self::Concept,
            Self::Time,
            Self::Artifact,
            Self::Sentiment,
        ]
    }

    /// Convert to the wire-format string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::Event => "EVENT",
            Self::Concept => "CONCEPT",
            Self::Time => "TIME",
            Self::Artifact => "ARTIFACT",
            Self::Sentiment => "SENTIMENT",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s).ok_or_else(|| format!("Unknown entity type: {}", s))
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_flexible(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown entity type: {}", s)))
    }
}

/// An entity as extracted from a single document.
///
/// `id` is only meaningful within the document it came from; geo/temporal
/// attributes live in the document's `locations`/`timeperiods` tables, keyed
/// by this id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEntity {
    /// Document-scoped identifier (e.g., "E1").
    pub id: String,
    /// Entity category.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Surface text as it appeared in the document.
    pub text: String,
    /// Normalized form, when the extraction stage produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Extraction confidence in [0, 1].
    pub confidence: f64,
}

impl LocalEntity {
    /// Best available text for matching and identity: the normalized form
    /// when present, otherwise the raw surface text.
    pub fn best_text(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.text)
    }
}

/// A deduplicated cross-document entity with a stable global identity.
///
/// At most one of `location`/`time` is populated, according to the entity
/// type. Both bags serialize flattened so the JSON graph keeps flat entity
/// objects. Serialize-only: the graph JSON is an export format, never read
/// back by this pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalEntity {
    /// Stable global identifier (12 hex chars of the signature hash).
    pub id: String,
    /// Entity category.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Representative surface text (from the highest-confidence mention).
    pub text: String,
    /// Normalized form, when any contributing mention had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Highest confidence among contributing mentions.
    pub confidence: f64,
    /// Ids of the documents that mentioned this entity, in integration order.
    pub sources: Vec<String>,
    /// Merged geographic attributes (LOCATION entities only).
    #[serde(flatten)]
    pub location: Option<LocationAttributes>,
    /// Merged temporal attributes (TIME entities only).
    #[serde(flatten)]
    pub time: Option<TimeAttributes>,
}

impl GlobalEntity {
    /// Best available text for matching: normalized form when present.
    pub fn best_text(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.text)
    }

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
    use crate::types::attributes::{TimeKind, TimePrecision};

    #[test]
    fn test_entity_type_from_str_flexible() {
        assert_eq!(EntityType::from_str_flexible("PERSON"), Some(EntityType::Person));
        assert_eq!(EntityType::from_str_flexible("person"), Some(EntityType::Person));
        assert_eq!(EntityType::from_str_flexible("  Location "), Some(EntityType::Location));
        assert_eq!(EntityType::from_str_flexible("date"), Some(EntityType::Time));
        assert_eq!(EntityType::from_str_flexible("artefact"), Some(EntityType::Artifact));
        assert_eq!(EntityType::from_str_flexible("opinion"), Some(EntityType::Sentiment));
        assert_eq!(EntityType::from_str_flexible("unknown"), None);
        assert_eq!(EntityType::from_str_flexible(""), None);
    }

    #[test]
    fn test_entity_type_serde_uppercase() {
        let json = serde_json::to_string(&EntityType::Location).unwrap();
        assert_eq!(json, "\"LOCATION\"");

        let parsed: EntityType = serde_json::from_str("\"SENTIMENT\"").unwrap();
        assert_eq!(parsed, EntityType::Sentiment);
    }

    #[test]
    fn test_entity_type_deserializes_noisy_spellings() {
        let parsed: EntityType = serde_json::from_str("\"Person\"").unwrap();
        assert_eq!(parsed, EntityType::Person);

        let parsed: EntityType = serde_json::from_str("\"loc\"").unwrap();
        assert_eq!(parsed, EntityType::Location);

        let entity: LocalEntity = serde_json::from_str(
            r#"{"id":"E1","type":"organisation","text":"Hofkammer","confidence":0.7}"#,
        )
        .unwrap();
        assert_eq!(entity.entity_type, EntityType::Organization);

        assert!(serde_json::from_str::<EntityType>("\"widget\"").is_err());
    }

    #[test]
    fn test_entity_type_all() {
        assert_eq!(EntityType::all().len(), 8);
    }

    #[test]
    fn test_local_entity_best_text() {
        let json = r#"{"id":"E1","type":"LOCATION","text":"Wien","normalized":"Vienna","confidence":0.9}"#;
        let entity: LocalEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.best_text(), "Vienna");

        let json = r#"{"id":"E2","type":"PERSON","text":"French troops","confidence":0.8}"#;
        let entity: LocalEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.best_text(), "French troops");
    }

    #[test]
    fn test_global_entity_add_source_is_idempotent() {
        let mut entity = GlobalEntity {
            id: "abc".into(),
            entity_type: EntityType::Person,
            text: "Napoleon".into(),
            normalized: None,
            confidence: 0.9,
            sources: vec!["doc1".into()],
            location: None,
            time: None,
        };
        entity.add_source("doc1");
        entity.add_source("doc2");
        entity.add_source("doc2");
        assert_eq!(entity.sources, vec!["doc1", "doc2"]);
    }

    #[test]
    fn test_time_entity_serializes_flat_without_key_collision() {
        let entity = GlobalEntity {
            id: "abc".into(),
            entity_type: EntityType::Time,
            text: "4 April 1915".into(),
            normalized: None,
            confidence: 0.9,
            sources: vec!["doc1".into()],
            location: None,
            time: Some(TimeAttributes {
                precision: Some(TimePrecision::Day),
                kind: Some(TimeKind::Point),
                start_date: Some("1915-04-04".into()),
                end_date: None,
                date_reliability: None,
            }),
        };
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], "TIME");
        assert_eq!(value["time_type"], "POINT");
        assert_eq!(value["start_date"], "1915-04-04");
    }
}
