//! Relation resolution and deduplication.
//!
//! Remaps a document-local relation onto global identities, drops relations
//! whose endpoints were never integrated, and deduplicates equivalent
//! assertions by signature, accumulating provenance and confidence.

use tracing::debug;

use gazette_core::{GlobalRelation, LocalRelation};

use crate::store::GraphStore;

/// What happened to one local relation during integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOutcome {
    /// A new global relation was created.
    Added,
    /// An equivalent relation existed; provenance and confidence merged.
    Merged,
    /// Subject or object had no global mapping; the relation was dropped.
    Dropped,
}

/// Integrate one local relation into the store.
///
/// Subject, object, and context ids resolve through the local→global map
/// built while integrating this document's entities. An unresolvable
/// subject or object drops the relation; an unresolvable context id is
/// simply omitted from the global relation.
pub fn integrate_relation(
    store: &mut GraphStore,
    document_id: &str,
    relation: &LocalRelation,
) -> RelationOutcome {
    let subject = store.resolve(document_id, &relation.subject).map(str::to_string);
    let object = store.resolve(document_id, &relation.object).map(str::to_string);

    let (subject, object) = match (subject, object) {
        (Some(s), Some(o)) => (s, o),
        _ => {
            debug!(
                document_id,
                subject = %relation.subject,
                object = %relation.object,
                "dropping relation with unmapped endpoint"
            );
            return RelationOutcome::Dropped;
        }
    };

    let context_time = relation
        .context_time
        .as_deref()
        .and_then(|local| store.resolve(document_id, local))
        .map(str::to_string);
    let context_location = relation
        .context_location
        .as_deref()
        .and_then(|local| store.resolve(document_id, local))
        .map(str::to_string);

    let signature = build_signature(
        &subject,
        &relation.predicate,
        &object,
        context_time.as_deref(),
        context_location.as_deref(),
    );

    if let Some(existing) = store.find_relation_mut(&signature) {
        if relation.confidence > existing.confidence {
            existing.confidence = relation.confidence;
        }
        existing.add_source(document_id);
        return RelationOutcome::Merged;
    }

    let id = relation_id(&signature);
    store.push_relation(GlobalRelation {
        id,
        subject,
        predicate: relation.predicate.clone(),
        object,
        confidence: relation.confidence,
        context_time,
        context_location,
        sources: vec![document_id.to_string()],
    });
    RelationOutcome::Added
}

/// Canonical dedup signature of a relation tuple. Context segments appear
/// only when the context resolved to a global entity.
pub fn build_signature(
    subject: &str,
    predicate: &str,
    object: &str,
    context_time: Option<&str>,
    context_location: Option<&str>,
) -> String {
    let mut signature = format!("{}_{}_{}", subject, predicate, object);
    if let Some(time) = context_time {
        signature.push_str("_time_");
        signature.push_str(time);
    }
    if let Some(location) = context_location {
        signature.push_str("_loc_");
        signature.push_str(location);
    }
    signature
}

/// Signature of an already-stored relation, rebuilt the same way as for
/// incoming ones.
pub fn signature_of(relation: &GlobalRelation) -> String {
    build_signature(
        &relation.subject,
        &relation.predicate,
        &relation.object,
        relation.context_time.as_deref(),
        relation.context_location.as_deref(),
    )
}

fn relation_id(signature: &str) -> String {
    let digest = format!("{:x}", md5::compute(signature.as_bytes()));
    format!("R{}", &digest[..11])
}
