//! Writes rendered documents to disk.
//!
//! Layout per document `D` under the output root `O`:
//!
//! ```text
//! O/D/mkdocs.yml
//! O/D/docs/index.md
//! O/D/docs/<page.../>section.md
//! ```
//!
//! `O/D` is removed and recreated on every run; sibling documents are never
//! touched. Within a document every Markdown file is written by its own task
//! and the manifest is written only once all of them have finished.

use crate::error::WriteError;
use crate::model::Diagnostic;
use crate::render::RenderedDocument;
use regex::Regex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static RE_PATH_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\\]+").unwrap());

pub const MANIFEST_FILE: &str = "mkdocs.yml";
pub const DOCS_DIR: &str = "docs";

/// Result of writing one document.
#[derive(Debug)]
pub struct DocumentReport {
    pub name: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Written files, or the reason the document failed
    pub result: Result<Vec<PathBuf>, WriteError>,
}

/// Directory name for a document: its name with path separators replaced so
/// it can never escape the output root.
pub fn document_dir_name(name: &str) -> String {
    let name = RE_PATH_SEPARATOR.replace_all(name.trim(), "-");
    if name.chars().all(|c| c == '.') {
        name.replace('.', "_")
    } else {
        name.into_owned()
    }
}

/// A document either claimed its directory and is being written, or lost the
/// directory to an earlier document with the same directory name.
enum Pending {
    Spawned(String, JoinHandle<DocumentReport>),
    Rejected(DocumentReport),
}

/// Write every document concurrently; reports keep the input order.
///
/// Directory names are claimed in input order before any task starts. A
/// document whose directory is already claimed is not written.
pub async fn write_all(docs: Vec<RenderedDocument>, output: &Path) -> Vec<DocumentReport> {
    let mut claimed: HashMap<String, String> = HashMap::new();
    let pending: Vec<Pending> = docs
        .into_iter()
        .map(|doc| {
            let dir = document_dir_name(&doc.name);
            if let Some(owner) = claimed.get(&dir) {
                warn!("documents {:?} and {:?} both map to {}", owner, doc.name, dir);
                return Pending::Rejected(DocumentReport {
                    result: Err(WriteError::DuplicateDirectory {
                        path: output.join(&dir),
                        owner: owner.clone(),
                    }),
                    name: doc.name,
                    diagnostics: doc.diagnostics,
                });
            }
            claimed.insert(dir, doc.name.clone());

            let name = doc.name.clone();
            let output = output.to_path_buf();
            let handle = tokio::spawn(async move {
                let result = write_document(&doc, &output).await;
                DocumentReport {
                    name: doc.name,
                    diagnostics: doc.diagnostics,
                    result,
                }
            });
            Pending::Spawned(name, handle)
        })
        .collect();

    let mut reports = Vec::with_capacity(pending.len());
    for entry in pending {
        let report = match entry {
            Pending::Spawned(name, handle) => handle.await.unwrap_or_else(|e| DocumentReport {
                name,
                diagnostics: Vec::new(),
                result: Err(WriteError::Join(e)),
            }),
            Pending::Rejected(report) => report,
        };
        reports.push(report);
    }
    reports
}

/// Recreate the document directory and write its files, then the manifest.
pub async fn write_document(
    doc: &RenderedDocument,
    output: &Path,
) -> Result<Vec<PathBuf>, WriteError> {
    let doc_dir = output.join(document_dir_name(&doc.name));
    let docs_dir = doc_dir.join(DOCS_DIR);

    match fs::remove_dir_all(&doc_dir).await {
        Ok(()) => debug!("removed previous output {}", doc_dir.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(WriteError::Prepare {
                path: doc_dir,
                source,
            })
        }
    }
    fs::create_dir_all(&docs_dir)
        .await
        .map_err(|source| WriteError::Prepare {
            path: docs_dir.clone(),
            source,
        })?;

    let handles: Vec<(PathBuf, JoinHandle<io::Result<()>>)> = doc
        .files
        .iter()
        .map(|file| {
            let path = file
                .path
                .split('/')
                .fold(docs_dir.clone(), |acc, part| acc.join(part));
            let content = file.content.clone();
            let task_path = path.clone();
            (path, tokio::spawn(async move { write_file(&task_path, &content).await }))
        })
        .collect();

    // Join point: every write settles before the manifest is written
    let total = handles.len();
    let mut written = Vec::with_capacity(total + 1);
    let mut failures = Vec::new();
    for (path, handle) in handles {
        match handle.await.map_err(io::Error::other).and_then(|r| r) {
            Ok(()) => written.push(path),
            Err(e) => {
                warn!("failed to write {}: {}", path.display(), e);
                failures.push((path, e));
            }
        }
    }

    let manifest_path = doc_dir.join(MANIFEST_FILE);
    let manifest = fs::write(&manifest_path, &doc.manifest).await;

    if !failures.is_empty() {
        // The manifest counts as one more file once sections already failed
        if let Err(e) = manifest {
            warn!("failed to write {}: {}", manifest_path.display(), e);
            failures.push((manifest_path, e));
        }
        return Err(WriteError::Files {
            failures,
            total: total + 1,
        });
    }
    manifest.map_err(|source| WriteError::Manifest {
        path: manifest_path.clone(),
        source,
    })?;
    written.push(manifest_path);

    info!("wrote {} ({} files)", doc_dir.display(), written.len());
    Ok(written)
}

async fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await
}
