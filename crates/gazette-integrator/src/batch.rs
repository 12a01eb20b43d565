//! Batch integration over a directory of per-document JSON files.
//!
//! Files are processed in sorted filename order to keep runs reproducible
//! (integration is order-dependent). A file that cannot be read or parsed
//! is warned about and skipped; the batch never aborts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gazette_core::{DocumentRecord, GazetteError, GazetteResult};

use crate::integrator::Integrator;

/// Outcome of one directory batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Files successfully parsed and integrated.
    pub files_processed: usize,
    /// Files skipped because they were unreadable or unparsable.
    pub files_skipped: usize,
    /// Documents integrated (a file may hold several).
    pub documents: usize,
}

/// Integrate every `*.json` file under `dir`, in sorted filename order.
///
/// Only the directory listing itself can fail; per-file errors degrade to
/// warnings and a `files_skipped` count.
pub fn integrate_directory(
    integrator: &mut Integrator,
    dir: impl AsRef<Path>,
) -> GazetteResult<BatchSummary> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut summary = BatchSummary::default();
    for (index, path) in paths.iter().enumerate() {
        info!(
            "[{}/{}] integrating {}",
            index + 1,
            paths.len(),
            path.display()
        );
        match integrate_file(integrator, path) {
            Ok(documents) => {
                summary.files_processed += 1;
                summary.documents += documents;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                summary.files_skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Integrate one input file; returns the number of documents it held.
pub fn integrate_file(integrator: &mut Integrator, path: &Path) -> GazetteResult<usize> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| GazetteError::parse(path.display().to_string(), e.to_string()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let documents = DocumentRecord::parse_batch(stem, value)?;

    let count = documents.len();
    for (document_id, record) in &documents {
        integrator.integrate_document(document_id, record);
    }
    Ok(count)
}
