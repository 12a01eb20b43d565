//! Global identity assignment.
//!
//! A global entity id is a truncated content hash of a canonical signature
//! derived from the entity's type and its best-available normalized
//! attribute. Hashing makes ids stable across runs; identical signatures
//! hashing to the same id is the intended merge trigger, not a collision.

use gazette_core::{EntityType, LocationAttributes, TimeAttributes};

/// Derive the stable global id for an entity.
///
/// Signature precedence:
/// - LOCATION with coordinates: `LOC_{lat}_{lon}` rounded to 5 decimals.
/// - TIME with a start date: `TIME_{start_date}`.
/// - Otherwise: `{TYPE}_{text}` with the text lowercased and
///   space-to-underscore normalized.
///
/// Pure function: equal inputs always produce equal ids.
pub fn global_entity_id(
    entity_type: EntityType,
    normalized_text: &str,
    location: Option<&LocationAttributes>,
    time: Option<&TimeAttributes>,
) -> String {
    let signature = signature_for(entity_type, normalized_text, location, time);
    let digest = format!("{:x}", md5::compute(signature.as_bytes()));
    digest[..12].to_string()
}

fn signature_for(
    entity_type: EntityType,
    normalized_text: &str,
    location: Option<&LocationAttributes>,
    time: Option<&TimeAttributes>,
) -> String {
    if entity_type == EntityType::Location {
        if let Some(attrs) = location {
            if let (Some(lat), Some(lon)) = (attrs.latitude, attrs.longitude) {
                return format!("LOC_{}_{}", round5(lat), round5(lon));
            }
        }
    }

    if entity_type == EntityType::Time {
        if let Some(attrs) = time {
            if let Some(start) = attrs.start_date.as_deref().filter(|d| !d.is_empty()) {
                return format!("TIME_{}", start);
            }
        }
    }

    format!(
        "{}_{}",
        entity_type,
        normalized_text.to_lowercase().replace(' ', "_")
    )
}

/// Round a coordinate to 5 decimal places (about one meter of latitude).
fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_idempotent() {
        let a = global_entity_id(EntityType::Person, "French troops", None, None);
        let b = global_entity_id(EntityType::Person, "French troops", None, None);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_text_signature_normalization() {
        // Case and spacing differences collapse to the same signature.
        let a = global_entity_id(EntityType::Person, "FRENCH TROOPS", None, None);
        let b = global_entity_id(EntityType::Person, "french troops", None, None);
        assert_eq!(a, b);

        // Different type, same text: different id.
        let c = global_entity_id(EntityType::Concept, "french troops", None, None);
        assert_ne!(a, c);
    }

    #[test]
    fn test_location_signature_uses_rounded_coordinates() {
        let attrs = |lat, lon| LocationAttributes {
            latitude: Some(lat),
            longitude: Some(lon),
            ..Default::default()
        };

        // Coordinates agreeing to 5 decimals share an id, whatever the text.
        let a = global_entity_id(EntityType::Location, "Vienna", Some(&attrs(48.208_200_1, 16.3738)), None);
        let b = global_entity_id(EntityType::Location, "Wien", Some(&attrs(48.208_2, 16.373_800_4)), None);
        assert_eq!(a, b);

        let c = global_entity_id(EntityType::Location, "Vienna", Some(&attrs(48.21, 16.3738)), None);
        assert_ne!(a, c);
    }

    #[test]
    fn test_location_without_coordinates_falls_back_to_text() {
        let empty = LocationAttributes::default();
        let a = global_entity_id(EntityType::Location, "Vienna", Some(&empty), None);
        let b = global_entity_id(EntityType::Location, "vienna", None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_time_signature_uses_start_date() {
        let attrs = TimeAttributes {
            start_date: Some("1915-04-04".into()),
            ..Default::default()
        };
        let a = global_entity_id(EntityType::Time, "4 April 1915", None, Some(&attrs));
        let b = global_entity_id(EntityType::Time, "April 4th", None, Some(&attrs));
        assert_eq!(a, b);

        let no_date = TimeAttributes::default();
        let c = global_entity_id(EntityType::Time, "last spring", None, Some(&no_date));
        let d = global_entity_id(EntityType::Time, "last spring", None, None);
        assert_eq!(c, d);
    }
}
