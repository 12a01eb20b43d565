//! JSON graph export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use gazette_core::{GazetteResult, GlobalEntity, GlobalRelation};

use crate::store::GraphStore;

#[derive(Serialize)]
struct GraphDocument<'a> {
    entities: &'a [GlobalEntity],
    relations: &'a [GlobalRelation],
}

/// Write the merged graph as `{"entities": [...], "relations": [...]}`,
/// pretty-printed, arrays in creation order.
pub fn write_graph_json(store: &GraphStore, path: impl AsRef<Path>) -> GazetteResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(
        file,
        &GraphDocument {
            entities: store.entities(),
            relations: store.relations(),
        },
    )?;

    info!(
        path = %path.display(),
        entities = store.entities().len(),
        relations = store.relations().len(),
        "integrated graph saved"
    );
    Ok(())
}
