//! gazette-integrator - Cross-document entity and relation integration.
//!
//! Takes independently extracted, locally-id'd entity/relation sets (one per
//! document) and merges them into a single deduplicated knowledge graph with
//! stable global identities, merged attributes, and provenance.
//!
//! # Example
//!
//! ```ignore
//! use gazette_core::IntegratorConfig;
//! use gazette_integrator::Integrator;
//!
//! let mut integrator = Integrator::new(IntegratorConfig::default());
//! for (document_id, record) in documents {
//!     integrator.integrate_document(&document_id, &record);
//! }
//! println!("{}", integrator.validate());
//! integrator.write_json("knowledge_graph.json")?;
//! integrator.write_neo4j_csv("neo4j_import")?;
//! ```
//!
//! Integration is order-dependent by design: entity matching against the
//! store is a linear scan in insertion order, first match wins. Callers
//! that need reproducible output must feed documents in a deterministic
//! order (e.g., sorted file names).

pub mod batch;
pub mod export;
pub mod identity;
pub mod integrator;
pub mod merge;
pub mod relations;
pub mod similarity;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use batch::{integrate_directory, BatchSummary};
pub use identity::global_entity_id;
pub use integrator::{DocumentStats, Integrator, KnowledgeGraph};
pub use relations::RelationOutcome;
pub use similarity::{entities_similar, haversine_km, sequence_ratio, EntityView};
pub use store::GraphStore;
pub use validate::ValidationReport;
