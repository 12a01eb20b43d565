//! Per-document input records.
//!
//! One record per document, as produced by the geo/temporal enhancement
//! stage: extracted entities and relations plus side tables of location and
//! time attributes keyed by local entity id.

use serde::{Deserialize, Serialize};

use crate::error::{GazetteError, GazetteResult};

use super::attributes::{LocationAttributes, TimeAttributes};
use super::entity::LocalEntity;
use super::relation::LocalRelation;

/// A row of the `locations` side table: geocoding output for one local
/// LOCATION entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRow {
    /// Local id of the entity these attributes belong to.
    pub entity_id: String,
    #[serde(flatten)]
    pub attributes: LocationAttributes,
}

/// A row of the `timeperiods` side table: parsed dates for one local TIME
/// entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePeriodRow {
    /// Local id of the entity these attributes belong to.
    pub entity_id: String,
    #[serde(flatten)]
    pub attributes: TimeAttributes,
}

/// Everything extracted from one document. All sections are optional in the
/// input; a missing section is an empty list, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub entities: Vec<LocalEntity>,
    #[serde(default)]
    pub relations: Vec<LocalRelation>,
    #[serde(default)]
    pub locations: Vec<LocationRow>,
    #[serde(default)]
    pub timeperiods: Vec<TimePeriodRow>,
}

impl DocumentRecord {
    /// Parse one input file's JSON into `(document_id, record)` pairs.
    ///
    /// Input files come in two shapes: a single document record, or a map of
    /// document-id to record. The map shape is detected as a JSON object
    /// with no top-level `entities` key whose values are all objects; its
    /// document ids are `{file_stem}_{key}`. A single record gets the file
    /// stem itself as document id.
    pub fn parse_batch(
        file_stem: &str,
        value: serde_json::Value,
    ) -> GazetteResult<Vec<(String, DocumentRecord)>> {
        match value {
            serde_json::Value::Object(map)
                if !map.contains_key("entities") && map.values().all(|v| v.is_object()) =>
            {
                let mut documents = Vec::with_capacity(map.len());
                for (key, doc_value) in map {
                    let record: DocumentRecord = serde_json::from_value(doc_value)
                        .map_err(|e| GazetteError::parse(file_stem, e.to_string()))?;
                    documents.push((format!("{}_{}", file_stem, key), record));
                }
                Ok(documents)
            }
            value => {
                let record: DocumentRecord = serde_json::from_value(value)
                    .map_err(|e| GazetteError::parse(file_stem, e.to_string()))?;
                Ok(vec![(file_stem.to_string(), record)])
            }
        }
    }
}
