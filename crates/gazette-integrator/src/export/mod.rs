//! Export routines for the integrated graph.
//!
//! Two forms: the JSON knowledge graph, and a normalized CSV set shaped for
//! Neo4j bulk import.

mod csv_export;
mod json;

pub use csv_export::write_neo4j_csv;
pub use json::write_graph_json;
