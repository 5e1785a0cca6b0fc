//! mkdocs.yml generation.
//!
//! Emitted by hand rather than through a YAML library so the layout matches
//! what mkdocs expects for its `pages` navigation:
//!
//! ```text
//! site_name: 'API'
//! pages:
//! - 'Users':
//!     - 'Create': 'users/create.md'
//! - 'Overview': 'overview.md'
//! ```

use super::{format_filename, section_path};
use crate::model::*;

const INDENT: &str = "    ";

/// Render the manifest for one document.
pub fn render_manifest(doc: &DocumentTree) -> String {
    let mut out = format!("site_name: {}\npages:\n", quote(&doc.name));
    write_entries(&doc.entries, 0, &mut Vec::new(), &mut out);
    out
}

fn write_entries(entries: &[Entry], depth: usize, dirs: &mut Vec<String>, out: &mut String) {
    let indent = INDENT.repeat(depth);
    for entry in entries {
        let name = quote(entry.name());
        match entry {
            Entry::Page(page) => {
                out.push_str(&format!("{}- {}:\n", indent, name));
                dirs.push(format_filename(&page.name));
                write_entries(&page.entries, depth + 1, dirs, out);
                dirs.pop();
            }
            Entry::Section(section) => {
                out.push_str(&format!(
                    "{}- {}: {}\n",
                    indent,
                    name,
                    quote(&section_path(dirs, &section.name))
                ));
            }
        }
    }
}

/// YAML single-quoted scalar.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
