//! Markdown files for a document tree: an index plus one file per section.

use super::comment::render_comment;
use super::{format_filename, section_path, shadows_index, RenderedFile, INDEX_FILE};
use crate::model::*;
use tracing::warn;

/// Render the index page and every section file, in tree order.
pub fn render_files(doc: &DocumentTree) -> (Vec<RenderedFile>, Vec<Diagnostic>) {
    let mut files = vec![RenderedFile {
        path: INDEX_FILE.to_string(),
        content: format!("# {}\n", doc.name),
    }];
    let mut diagnostics = Vec::new();
    walk(&doc.entries, &mut Vec::new(), &mut files, &mut diagnostics);
    (files, diagnostics)
}

fn walk(
    entries: &[Entry],
    dirs: &mut Vec<String>,
    files: &mut Vec<RenderedFile>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for entry in entries {
        match entry {
            Entry::Page(page) => {
                dirs.push(format_filename(&page.name));
                walk(&page.entries, dirs, files, diagnostics);
                dirs.pop();
            }
            Entry::Section(section) => {
                if shadows_index(dirs, &section.name) {
                    warn!(
                        "section {:?} would replace {}, writing it as {}",
                        section.name,
                        INDEX_FILE,
                        section_path(dirs, &section.name)
                    );
                }
                files.push(RenderedFile {
                    path: section_path(dirs, &section.name),
                    content: render_section(section, diagnostics),
                });
            }
        }
    }
}

/// `## <Section>` followed by every comment fragment in arrival order.
fn render_section(section: &Section, diagnostics: &mut Vec<Diagnostic>) -> String {
    let mut out = format!("## {}\n\n", section.name);
    for comment in &section.comments {
        let rendered = render_comment(comment);
        out.push_str(&rendered.markdown);
        diagnostics.extend(rendered.diagnostics);
    }
    out
}
