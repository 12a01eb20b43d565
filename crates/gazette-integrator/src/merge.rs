//! Attribute merging under the completeness/precision-priority policy.
//!
//! All merges are in-place and monotone: a populated field is never cleared,
//! only filled in or replaced by a strictly more complete or more precise
//! value.

use gazette_core::{GlobalEntity, LocalEntity, LocationAttributes, TimeAttributes};

/// Merge a new mention's geographic attributes into a global entity's bag.
///
/// Completeness first: every field missing in the target is copied from the
/// incoming bag. Then refinement: a strictly longer `display_name` replaces
/// the stored one, and coordinates with strictly more decimal precision
/// replace latitude, longitude, and all four bounding-box fields as one
/// atomic group.
pub fn merge_location(target: &mut LocationAttributes, incoming: &LocationAttributes) {
    // Completeness: fill in whatever the target is missing.
    fill_f64(&mut target.latitude, &incoming.latitude);
    fill_f64(&mut target.longitude, &incoming.longitude);
    fill_string(&mut target.display_name, &incoming.display_name);
    fill_string(&mut target.location_type, &incoming.location_type);
    fill_f64(&mut target.importance, &incoming.importance);
    if target.osm_id.is_none() {
        target.osm_id = incoming.osm_id;
    }
    fill_f64(&mut target.bbox_south, &incoming.bbox_south);
    fill_f64(&mut target.bbox_north, &incoming.bbox_north);
    fill_f64(&mut target.bbox_west, &incoming.bbox_west);
    fill_f64(&mut target.bbox_east, &incoming.bbox_east);

    // A longer display name is assumed to be the more qualified one.
    if let (Some(current), Some(new)) = (&target.display_name, &incoming.display_name) {
        if new.len() > current.len() {
            target.display_name = Some(new.clone());
        }
    }

    // Higher-precision coordinates replace the whole geometry group, so the
    // bounding box never disagrees with the point it belongs to.
    if let (Some(cur_lat), Some(cur_lon), Some(new_lat), Some(new_lon)) = (
        target.latitude,
        target.longitude,
        incoming.latitude,
        incoming.longitude,
    ) {
        let more_precise = decimal_digits(new_lat) > decimal_digits(cur_lat)
            || decimal_digits(new_lon) > decimal_digits(cur_lon);
        if more_precise {
            target.latitude = Some(new_lat);
            target.longitude = Some(new_lon);
            replace_if_present(&mut target.bbox_south, &incoming.bbox_south);
            replace_if_present(&mut target.bbox_north, &incoming.bbox_north);
            replace_if_present(&mut target.bbox_west, &incoming.bbox_west);
            replace_if_present(&mut target.bbox_east, &incoming.bbox_east);
        }
    }
}

/// Merge a new mention's temporal attributes into a global entity's bag.
///
/// Completeness first (the `type` field is exempt: it is only ever set by
/// the precision upgrade below). Then refinement: a strictly higher
/// precision rank replaces the full set {precision, type, start_date,
/// end_date, date_reliability} as one atomic group.
pub fn merge_time(target: &mut TimeAttributes, incoming: &TimeAttributes) {
    let current_precision = target.precision;

    if target.precision.is_none() {
        target.precision = incoming.precision;
    }
    fill_string(&mut target.start_date, &incoming.start_date);
    fill_string(&mut target.end_date, &incoming.end_date);
    fill_f64(&mut target.date_reliability, &incoming.date_reliability);

    // The upgrade compares against the precision stored before the
    // completeness pass, so a just-filled precision does not count as an
    // equal-rank block against itself.
    if let (Some(current), Some(new)) = (current_precision, incoming.precision) {
        if new.rank() > current.rank() {
            target.precision = Some(new);
            if incoming.kind.is_some() {
                target.kind = incoming.kind;
            }
            replace_if_present_string(&mut target.start_date, &incoming.start_date);
            replace_if_present_string(&mut target.end_date, &incoming.end_date);
            replace_if_present(&mut target.date_reliability, &incoming.date_reliability);
        }
    }
}

/// Update a global entity's top-level fields from a new mention, when the
/// mention's confidence strictly exceeds the stored one.
pub fn merge_entity_core(global: &mut GlobalEntity, incoming: &LocalEntity) {
    if incoming.confidence > global.confidence {
        global.text = incoming.text.clone();
        global.confidence = incoming.confidence;
        if incoming.normalized.is_some() {
            global.normalized = incoming.normalized.clone();
        }
    }
}

/// Number of digits after the decimal point in the shortest decimal
/// representation of `value`. Integral values count as zero.
fn decimal_digits(value: f64) -> usize {
    let repr = format!("{}", value);
    match repr.split_once('.') {
        Some((_, frac)) => frac.len(),
        None => 0,
    }
}

fn fill_f64(target: &mut Option<f64>, incoming: &Option<f64>) {
    if target.is_none() {
        *target = *incoming;
    }
}

/// Missing-or-empty strings count as absent for the completeness rule.
fn fill_string(target: &mut Option<String>, incoming: &Option<String>) {
    let missing = target.as_deref().map_or(true, str::is_empty);
    if missing && incoming.is_some() {
        *target = incoming.clone();
    }
}

fn replace_if_present(target: &mut Option<f64>, incoming: &Option<f64>) {
    if incoming.is_some() {
        *target = *incoming;
    }
}

fn replace_if_present_string(target: &mut Option<String>, incoming: &Option<String>) {
    if incoming.is_some() {
        *target = incoming.clone();
    }
}
