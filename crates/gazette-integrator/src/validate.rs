//! Aggregate data-quality statistics over the integrated graph.
//!
//! Validation never influences integration; it reports how complete the
//! merged attribute data is (coordinates on locations, dates on times,
//! context on relations) for the batch summary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use gazette_core::EntityType;

use crate::store::GraphStore;

/// Counts describing the integrated graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_entities: usize,
    pub total_relations: usize,
    /// Entity counts keyed by type, in sorted order.
    pub entities_by_type: BTreeMap<String, usize>,
    pub locations_with_coords: usize,
    pub locations_without_coords: usize,
    pub times_with_dates: usize,
    pub times_without_dates: usize,
    pub relations_with_time: usize,
    pub relations_with_location: usize,
}

impl ValidationReport {
    /// Walk the store once and tally everything.
    pub fn compute(store: &GraphStore) -> Self {
        let mut report = Self {
            total_entities: store.entities().len(),
            total_relations: store.relations().len(),
            ..Default::default()
        };

        for entity in store.entities() {
            *report
                .entities_by_type
                .entry(entity.entity_type.to_string())
                .or_insert(0) += 1;

            match entity.entity_type {
                EntityType::Location => {
                    let has_coords = entity
                        .location
                        .as_ref()
                        .is_some_and(|attrs| attrs.has_coordinates());
                    if has_coords {
                        report.locations_with_coords += 1;
                    } else {
                        report.locations_without_coords += 1;
                    }
                }
                EntityType::Time => {
                    let has_date = entity
                        .time
                        .as_ref()
                        .is_some_and(|attrs| attrs.has_start_date());
                    if has_date {
                        report.times_with_dates += 1;
                    } else {
                        report.times_without_dates += 1;
                    }
                }
                _ => {}
            }
        }

        for relation in store.relations() {
            if relation.context_time.is_some() {
                report.relations_with_time += 1;
            }
            if relation.context_location.is_some() {
                report.relations_with_location += 1;
            }
        }

        report
    }

    fn percent(part: usize, whole: usize) -> f64 {
        if whole == 0 {
            0.0
        } else {
            part as f64 / whole as f64 * 100.0
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Entity Integration Validation ===")?;
        writeln!(f, "Total unique entities: {}", self.total_entities)?;
        writeln!(f, "Total relations: {}", self.total_relations)?;

        writeln!(f, "\nEntity types:")?;
        for (entity_type, count) in &self.entities_by_type {
            writeln!(f, "  {}: {}", entity_type, count)?;
        }

        let total_locations = self.locations_with_coords + self.locations_without_coords;
        if total_locations > 0 {
            writeln!(f, "\nLocation entities:")?;
            writeln!(
                f,
                "  With coordinates: {} ({:.1}%)",
                self.locations_with_coords,
                Self::percent(self.locations_with_coords, total_locations)
            )?;
            writeln!(
                f,
                "  Without coordinates: {} ({:.1}%)",
                self.locations_without_coords,
                Self::percent(self.locations_without_coords, total_locations)
            )?;
        }

        let total_times = self.times_with_dates + self.times_without_dates;
        if total_times > 0 {
            writeln!(f, "\nTime entities:")?;
            writeln!(
                f,
                "  With date information: {} ({:.1}%)",
                self.times_with_dates,
                Self::percent(self.times_with_dates, total_times)
            )?;
            writeln!(
                f,
                "  Without date information: {} ({:.1}%)",
                self.times_without_dates,
                Self::percent(self.times_without_dates, total_times)
            )?;
        }

        if self.total_relations > 0 {
            writeln!(f, "\nRelation contexts:")?;
            writeln!(
                f,
                "  With time context: {} ({:.1}%)",
                self.relations_with_time,
                Self::percent(self.relations_with_time, self.total_relations)
            )?;
            writeln!(
                f,
                "  With location context: {} ({:.1}%)",
                self.relations_with_location,
                Self::percent(self.relations_with_location, self.total_relations)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::{GlobalEntity, GlobalRelation, LocationAttributes};

    fn store_with_fixture() -> GraphStore {
        let mut store = GraphStore::new();
        store.push_entity(GlobalEntity {
            id: "loc1".into(),
            entity_type: EntityType::Location,
            text: "Vienna".into(),
            normalized: None,
            confidence: 0.9,
            sources: vec!["doc1".into()],
            location: Some(LocationAttributes {
                latitude: Some(48.2082),
                longitude: Some(16.3738),
                ..Default::default()
            }),
            time: None,
        });
        store.push_entity(GlobalEntity {
            id: "loc2".into(),
            entity_type: EntityType::Location,
            text: "the fortress".into(),
            normalized: None,
            confidence: 0.6,
            sources: vec!["doc1".into()],
            location: None,
            time: None,
        });
        store.push_entity(GlobalEntity {
            id: "per1".into(),
            entity_type: EntityType::Person,
            text: "Napoleon".into(),
            normalized: None,
            confidence: 0.95,
            sources: vec!["doc1".into()],
            location: None,
            time: None,
        });
        store.push_relation(GlobalRelation {
            id: "R1".into(),
            subject: "per1".into(),
            predicate: "entered".into(),
            object: "loc1".into(),
            confidence: 0.8,
            context_time: None,
            context_location: Some("loc1".into()),
            sources: vec!["doc1".into()],
        });
        store
    }

    #[test]
    fn test_report_counts() {
        let report = ValidationReport::compute(&store_with_fixture());

        assert_eq!(report.total_entities, 3);
        assert_eq!(report.total_relations, 1);
        assert_eq!(report.entities_by_type["LOCATION"], 2);
        assert_eq!(report.entities_by_type["PERSON"], 1);
        assert_eq!(report.locations_with_coords, 1);
        assert_eq!(report.locations_without_coords, 1);
        assert_eq!(report.times_with_dates, 0);
        assert_eq!(report.relations_with_time, 0);
        assert_eq!(report.relations_with_location, 1);
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport::compute(&store_with_fixture());
        let text = report.to_string();
        assert!(text.contains("Total unique entities: 3"));
        assert!(text.contains("LOCATION: 2"));
        assert!(text.contains("With coordinates: 1 (50.0%)"));
        assert!(text.contains("With location context: 1 (100.0%)"));
    }

    #[test]
    fn test_empty_store_report() {
        let report = ValidationReport::compute(&GraphStore::new());
        assert_eq!(report.total_entities, 0);
        // No divide-by-zero in the rendered report.
        let text = report.to_string();
        assert!(text.contains("Total relations: 0"));
    }
}
