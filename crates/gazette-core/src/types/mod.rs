//! Type definitions for document-scoped input records and global output
//! records.

mod attributes;
mod document;
mod entity;
mod relation;

pub use attributes::{LocationAttributes, TimeAttributes, TimeKind, TimePrecision};
pub use document::{DocumentRecord, LocationRow, TimePeriodRow};
pub use entity::{EntityType, GlobalEntity, LocalEntity};
pub use relation::{GlobalRelation, LocalRelation};
