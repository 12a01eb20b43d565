//! gazette-core - Core types for the gazette knowledge graph integrator.
//!
//! This crate provides the shared vocabulary of the integration engine:
//! document-scoped input records (entities, relations, geo/temporal
//! attribute tables), the deduplicated global output records, the
//! integration configuration, and the error type.
//!
//! The integration engine itself lives in `gazette-integrator`.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::IntegratorConfig;
pub use error::{GazetteError, GazetteResult};
pub use types::{
    DocumentRecord, EntityType, GlobalEntity, GlobalRelation, LocalEntity, LocalRelation,
    LocationAttributes, LocationRow, TimeAttributes, TimeKind, TimePeriodRow, TimePrecision,
};
