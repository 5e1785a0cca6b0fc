//! Parser module — comment extraction from source files.

pub mod block;

use crate::model::RawComment;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Read each file and extract its documentation comments, in file order.
///
/// Unreadable files are skipped with a warning rather than failing the run.
pub fn extract_all(files: &[impl AsRef<Path>]) -> Vec<RawComment> {
    let mut comments = Vec::new();
    for path in files {
        let path = path.as_ref();
        match extract_file(path) {
            Ok(found) => {
                debug!("{}: {} comment(s)", path.display(), found.len());
                comments.extend(found);
            }
            Err(e) => warn!("skipping {}: {:#}", path.display(), e),
        }
    }
    comments
}

/// Extract all block doc comments from a single file.
pub fn extract_file(path: &Path) -> Result<Vec<RawComment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(block::parse(&content, &path.to_string_lossy()))
}
