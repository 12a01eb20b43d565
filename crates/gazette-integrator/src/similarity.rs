//! Type-aware entity similarity.
//!
//! Decides whether two entities refer to the same real-world thing:
//! geodesic distance for located entities, date equality for temporal ones,
//! and a diff-style sequence ratio over normalized text for everything else
//! (and as the fallback when geo/temporal attributes are missing).

use std::collections::HashMap;

use gazette_core::{
    EntityType, GlobalEntity, IntegratorConfig, LocalEntity, LocationAttributes, TimeAttributes,
};

/// A uniform read-only view over local and global entities, pairing the
/// entity with whatever attribute bags it has. Local entities keep their
/// attributes in per-document side tables, so the view is assembled by the
/// caller.
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    pub entity_type: EntityType,
    /// Best available text: normalized form when present, else surface text.
    pub text: &'a str,
    pub normalized: Option<&'a str>,
    pub location: Option<&'a LocationAttributes>,
    pub time: Option<&'a TimeAttributes>,
}

impl<'a> EntityView<'a> {
    /// View over a document-local entity plus its side-table attributes.
    pub fn local(
        entity: &'a LocalEntity,
        location: Option<&'a LocationAttributes>,
        time: Option<&'a TimeAttributes>,
    ) -> Self {
        Self {
            entity_type: entity.entity_type,
            text: entity.best_text(),
            normalized: entity.normalized.as_deref(),
            location,
            time,
        }
    }

    /// View over an already-integrated global entity.
    pub fn global(entity: &'a GlobalEntity) -> Self {
        Self {
            entity_type: entity.entity_type,
            text: entity.best_text(),
            normalized: entity.normalized.as_deref(),
            location: entity.location.as_ref(),
            time: entity.time.as_ref(),
        }
    }
}

/// Decide whether two entities are the same real-world referent.
///
/// The predicate is symmetric. Entities of different types never match.
pub fn entities_similar(a: &EntityView, b: &EntityView, config: &IntegratorConfig) -> bool {
    if a.entity_type != b.entity_type {
        return false;
    }

    if a.entity_type == EntityType::Location {
        if let (Some(la), Some(lb)) = (a.location, b.location) {
            if let (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) =
                (la.latitude, la.longitude, lb.latitude, lb.longitude)
            {
                let distance = haversine_km(lat1, lon1, lat2, lon2);
                return distance < config.location_radius_km;
            }
        }
        // Missing coordinates on either side: fall through to text.
    }

    if a.entity_type == EntityType::Time {
        let start_a = a.time.filter(|t| t.has_start_date());
        let start_b = b.time.filter(|t| t.has_start_date());
        if let (Some(ta), Some(tb)) = (start_a, start_b) {
            return ta.start_date == tb.start_date;
        }
        if let (Some(na), Some(nb)) = (a.normalized, b.normalized) {
            return na == nb;
        }
        // Neither dates nor normalized forms on both sides: fall through.
    }

    let ratio = sequence_ratio(&a.text.to_lowercase(), &b.text.to_lowercase());
    ratio >= config.similarity_threshold
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sequence similarity ratio over characters: `2 * M / (len_a + len_b)`,
/// where M is the total length of the longest matching blocks found by
/// recursively locating the longest common substring, as in classic diff
/// algorithms. 1.0 for identical strings, 0.0 for fully disjoint ones.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matches as f64 / total as f64
}

/// Total matched characters between `a[alo..ahi]` and `b[blo..bhi]`: the
/// longest common block plus whatever matches recursively on each side.
fn matching_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
    if k == 0 {
        return 0;
    }
    k + matching_chars(a, b, alo, i, blo, j) + matching_chars(a, b, i + k, ahi, j + k, bhi)
}

/// Longest matching block between `a[alo..ahi]` and `b[blo..bhi]`, as
/// `(start_a, start_b, length)`. Ties resolve to the earliest block.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate().take(bhi).skip(blo) {
        b_positions.entry(ch).or_default().push(j);
    }

    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run_lengths[j] = length of the common run ending at a[i], b[j]
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_positions.get(&a[i]) {
            for &j in positions {
                let k = run_lengths
                    .get(&j.wrapping_sub(1))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        run_lengths = next_runs;
    }
    (best_i, best_j, best_k)
}
