//! Neo4j bulk-import CSV export.
//!
//! Four record sets: one row per entity for base fields, one row per
//! LOCATION entity for geo fields, one row per TIME entity for temporal
//! fields, one row per relation. Absent values are empty fields;
//! multi-valued `sources` join with `|`.

use std::path::Path;

use tracing::info;

use gazette_core::{EntityType, GazetteResult};

use crate::store::GraphStore;

/// Write `entities.csv`, `locations.csv`, `timeperiods.csv`, and
/// `relations.csv` into `dir`, creating it if needed.
pub fn write_neo4j_csv(store: &GraphStore, dir: impl AsRef<Path>) -> GazetteResult<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    write_entities(store, &dir.join("entities.csv"))?;
    write_locations(store, &dir.join("locations.csv"))?;
    write_timeperiods(store, &dir.join("timeperiods.csv"))?;
    write_relations(store, &dir.join("relations.csv"))?;

    info!(dir = %dir.display(), "Neo4j import CSV files generated");
    Ok(())
}

fn write_entities(store: &GraphStore, path: &Path) -> GazetteResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["entity_id", "type", "text", "normalized", "confidence", "sources"])?;

    for entity in store.entities() {
        let confidence = entity.confidence.to_string();
        let sources = entity.sources.join("|");
        writer.write_record([
            entity.id.as_str(),
            entity.entity_type.as_str(),
            entity.text.as_str(),
            entity.normalized.as_deref().unwrap_or(""),
            confidence.as_str(),
            sources.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_locations(store: &GraphStore, path: &Path) -> GazetteResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "entity_id",
        "latitude",
        "longitude",
        "display_name",
        "location_type",
        "importance",
        "bbox_south",
        "bbox_north",
        "bbox_west",
        "bbox_east",
    ])?;

    let mut count = 0usize;
    for entity in store.entities() {
        if entity.entity_type != EntityType::Location {
            continue;
        }
        let attrs = entity.location.clone().unwrap_or_default();
        let latitude = opt_f64(attrs.latitude);
        let longitude = opt_f64(attrs.longitude);
        let importance = opt_f64(attrs.importance);
        let bbox_south = opt_f64(attrs.bbox_south);
        let bbox_north = opt_f64(attrs.bbox_north);
        let bbox_west = opt_f64(attrs.bbox_west);
        let bbox_east = opt_f64(attrs.bbox_east);
        writer.write_record([
            entity.id.as_str(),
            latitude.as_str(),
            longitude.as_str(),
            attrs.display_name.as_deref().unwrap_or(""),
            attrs.location_type.as_deref().unwrap_or(""),
            importance.as_str(),
            bbox_south.as_str(),
            bbox_north.as_str(),
            bbox_west.as_str(),
            bbox_east.as_str(),
        ])?;
        count += 1;
    }
    writer.flush()?;

    info!(count, "wrote location entities to locations.csv");
    Ok(())
}

fn write_timeperiods(store: &GraphStore, path: &Path) -> GazetteResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "entity_id",
        "precision",
        "type",
        "start_date",
        "end_date",
        "date_reliability",
    ])?;

    let mut count = 0usize;
    for entity in store.entities() {
        if entity.entity_type != EntityType::Time {
            continue;
        }
        let attrs = entity.time.clone().unwrap_or_default();
        let start_date = attrs.start_date.as_deref().unwrap_or("");
        // A point in time with no explicit end ends when it starts.
        let end_date = attrs.end_date.as_deref().unwrap_or(start_date);
        let reliability = opt_f64(attrs.date_reliability);
        writer.write_record([
            entity.id.as_str(),
            attrs.precision.unwrap_or_default().as_str(),
            attrs.kind.unwrap_or_default().as_str(),
            start_date,
            end_date,
            reliability.as_str(),
        ])?;
        count += 1;
    }
    writer.flush()?;

    info!(count, "wrote time entities to timeperiods.csv");
    Ok(())
}

fn write_relations(store: &GraphStore, path: &Path) -> GazetteResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "relation_id",
        "subject_id",
        "predicate",
        "object_id",
        "confidence",
        "context_time_id",
        "context_location_id",
        "sources",
    ])?;

    for relation in store.relations() {
        let confidence = relation.confidence.to_string();
        let sources = relation.sources.join("|");
        writer.write_record([
            relation.id.as_str(),
            relation.subject.as_str(),
            relation.predicate.as_str(),
            relation.object.as_str(),
            confidence.as_str(),
            relation.context_time.as_deref().unwrap_or(""),
            relation.context_location.as_deref().unwrap_or(""),
            sources.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
