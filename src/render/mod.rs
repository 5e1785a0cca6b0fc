//! Renderer module — turns document trees into Markdown files and a manifest.

pub mod comment;
pub mod manifest;
pub mod tree;

use crate::model::Diagnostic;
use regex::Regex;
use std::sync::LazyLock;

static RE_FILENAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]+").unwrap());

/// Name of the per-document landing page, relative to the docs root.
pub const INDEX_FILE: &str = "index.md";

/// A Markdown file, path relative to the document's docs root.
#[derive(Debug, PartialEq, Eq)]
pub struct RenderedFile {
    /// Forward-slash separated on every platform
    pub path: String,
    pub content: String,
}

/// Everything needed to write one document.
#[derive(Debug)]
pub struct RenderedDocument {
    pub name: String,
    pub files: Vec<RenderedFile>,
    /// Contents of `mkdocs.yml`
    pub manifest: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Slug of a root section whose file would shadow [`INDEX_FILE`].
const INDEX_SLUG: &str = "index";

/// Derive a file or directory name from a page or section name.
///
/// Lower-cases and collapses whitespace and path separators into a single
/// hyphen. Dot-only results (`.`, `..`) become underscores so a name can
/// never point outside its parent. Names differing only in case or spacing
/// collide.
pub fn format_filename(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let slug = RE_FILENAME_SEPARATOR.replace_all(&lowered, "-");
    if slug.chars().all(|c| c == '.') {
        slug.replace('.', "_")
    } else {
        slug.into_owned()
    }
}

/// Whether a section at this level would be written over the index page.
fn shadows_index(dirs: &[String], section: &str) -> bool {
    dirs.is_empty() && format_filename(section) == INDEX_SLUG
}

/// Relative path of a section file below the given page directories.
///
/// A root section slugged `index` is written as `index-section.md`.
fn section_path(dirs: &[String], section: &str) -> String {
    let slug = format_filename(section);
    if dirs.is_empty() {
        if slug == INDEX_SLUG {
            format!("{}-section.md", slug)
        } else {
            format!("{}.md", slug)
        }
    } else {
        format!("{}/{}.md", dirs.join("/"), slug)
    }
}

/// Render a document tree into its files and manifest.
pub fn render_document(doc: &crate::model::DocumentTree) -> RenderedDocument {
    let (files, diagnostics) = tree::render_files(doc);
    RenderedDocument {
        name: doc.name.clone(),
        files,
        manifest: manifest::render_manifest(doc),
        diagnostics,
    }
}
