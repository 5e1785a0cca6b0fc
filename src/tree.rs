//! Tree builder: fold directive-carrying comments into one tree per document.

use crate::directive::PathDirective;
use crate::error::BuildError;
use crate::model::*;

/// Build document trees from comments that all carry the directive.
///
/// Documents, pages, sections and comments keep their first-seen order.
/// A comment without a directive fails the build.
pub fn build(comments: Vec<RawComment>, directive: &str) -> Result<Vec<DocumentTree>, BuildError> {
    let mut documents: Vec<DocumentTree> = Vec::new();

    for comment in comments {
        let Some(path) = PathDirective::from_comment(&comment, directive) else {
            return Err(BuildError::MissingDirective {
                file: comment.source.file,
                line: comment.source.line,
                directive: directive.to_string(),
            });
        };

        let doc = match documents.iter().position(|d| d.name == path.document()) {
            Some(idx) => &mut documents[idx],
            None => {
                documents.push(DocumentTree {
                    name: path.document().to_string(),
                    entries: Vec::new(),
                });
                let last = documents.len() - 1;
                &mut documents[last]
            }
        };

        insert(&mut doc.entries, &path, comment);
    }

    Ok(documents)
}

/// Walk (creating as needed) the page chain, then append to the section.
fn insert(entries: &mut Vec<Entry>, path: &PathDirective, comment: RawComment) {
    let mut level = entries;
    for page in path.pages() {
        level = page_entries(level, page);
    }
    section_comments(level, path.section()).push(comment);
}

fn page_entries<'a>(entries: &'a mut Vec<Entry>, name: &str) -> &'a mut Vec<Entry> {
    let idx = match entries
        .iter()
        .position(|e| matches!(e, Entry::Page(p) if p.name == name))
    {
        Some(idx) => idx,
        None => {
            entries.push(Entry::Page(PageNode {
                name: name.to_string(),
                entries: Vec::new(),
            }));
            entries.len() - 1
        }
    };
    match &mut entries[idx] {
        Entry::Page(page) => &mut page.entries,
        Entry::Section(_) => unreachable!("index points at a page"),
    }
}

fn section_comments<'a>(entries: &'a mut Vec<Entry>, name: &str) -> &'a mut Vec<RawComment> {
    let idx = match entries
        .iter()
        .position(|e| matches!(e, Entry::Section(s) if s.name == name))
    {
        Some(idx) => idx,
        None => {
            entries.push(Entry::Section(Section {
                name: name.to_string(),
                comments: Vec::new(),
            }));
            entries.len() - 1
        }
    };
    match &mut entries[idx] {
        Entry::Section(section) => &mut section.comments,
        Entry::Page(_) => unreachable!("index points at a section"),
    }
}

/// Total number of comments held anywhere in a tree.
pub fn comment_count(entries: &[Entry]) -> usize {
    entries
        .iter()
        .map(|e| match e {
            Entry::Page(page) => comment_count(&page.entries),
            Entry::Section(section) => section.comments.len(),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Source, Tag};

    fn comment(directive: &str, line: usize) -> RawComment {
        RawComment {
            description: String::new(),
            tags: vec![Tag {
                tag: "mkdocs".to_string(),
                raw: directive.to_string(),
                line,
            }],
            source: Source {
                file: "a.js".to_string(),
                line,
            },
        }
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::name).collect()
    }

    fn page<'a>(entries: &'a [Entry], name: &str) -> &'a PageNode {
        entries
            .iter()
            .find_map(|e| match e {
                Entry::Page(p) if p.name == name => Some(p),
                _ => None,
            })
            .unwrap()
    }

    fn section<'a>(entries: &'a [Entry], name: &str) -> &'a Section {
        entries
            .iter()
            .find_map(|e| match e {
                Entry::Section(s) if s.name == name => Some(s),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn same_path_shares_page_and_section() {
        let docs = build(
            vec![comment("Doc // Page // Sec", 1), comment("Doc // Page // Sec", 2)],
            "mkdocs",
        )
        .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(names(&docs[0].entries), ["Page"]);
        let page = page(&docs[0].entries, "Page");
        assert_eq!(names(&page.entries), ["Sec"]);
        let lines: Vec<usize> = section(&page.entries, "Sec")
            .comments
            .iter()
            .map(|c| c.source.line)
            .collect();
        assert_eq!(lines, [1, 2]);
    }

    #[test]
    fn two_segments_make_root_section() {
        let docs = build(vec![comment("Doc // Sec", 1)], "mkdocs").unwrap();
        assert!(matches!(&docs[0].entries[..], [Entry::Section(s)] if s.name == "Sec"));
    }

    #[test]
    fn single_segment_document() {
        let docs = build(vec![comment("Guide", 1), comment("Guide", 2)], "mkdocs").unwrap();
        assert_eq!(docs[0].name, "Guide");
        assert_eq!(section(&docs[0].entries, "Guide").comments.len(), 2);
    }

    #[test]
    fn order_is_first_seen() {
        let docs = build(
            vec![
                comment("B // X // One", 1),
                comment("A // Sec", 2),
                comment("B // Y // Two", 3),
                comment("B // X // Zero", 4),
                comment("B // Top", 5),
            ],
            "mkdocs",
        )
        .unwrap();
        let doc_names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(doc_names, ["B", "A"]);
        assert_eq!(names(&docs[0].entries), ["X", "Y", "Top"]);
        assert_eq!(names(&page(&docs[0].entries, "X").entries), ["One", "Zero"]);
    }

    #[test]
    fn page_names_scoped_to_parent() {
        let docs = build(
            vec![
                comment("Doc // A // Shared // S", 1),
                comment("Doc // B // Shared // S", 2),
                comment("Other // Shared // S", 3),
            ],
            "mkdocs",
        )
        .unwrap();
        assert_eq!(docs.len(), 2);
        let a = page(&docs[0].entries, "A");
        let b = page(&docs[0].entries, "B");
        assert_eq!(comment_count(&page(&a.entries, "Shared").entries), 1);
        assert_eq!(comment_count(&page(&b.entries, "Shared").entries), 1);
    }

    #[test]
    fn page_and_section_may_share_a_name() {
        let docs = build(
            vec![comment("Doc // Users", 1), comment("Doc // Users // Create", 2)],
            "mkdocs",
        )
        .unwrap();
        let entries = &docs[0].entries;
        assert!(matches!(&entries[0], Entry::Section(s) if s.name == "Users"));
        assert!(matches!(&entries[1], Entry::Page(p) if p.name == "Users"));
    }

    #[test]
    fn deep_nesting() {
        let docs = build(vec![comment("D // 1 // 2 // 3 // 4 // S", 1)], "mkdocs").unwrap();
        let mut entries = &docs[0].entries;
        for name in ["1", "2", "3", "4"] {
            entries = &page(entries, name).entries;
        }
        assert_eq!(section(entries, "S").comments.len(), 1);
    }

    #[test]
    fn every_comment_placed_once() {
        let directives = [
            "A // B // C",
            "A // B // D",
            "A // E",
            "F",
            "A // B // C",
            "F // G // H",
        ];
        let comments: Vec<_> = directives
            .iter()
            .enumerate()
            .map(|(i, d)| comment(d, i))
            .collect();
        let docs = build(comments, "mkdocs").unwrap();
        let total: usize = docs.iter().map(|d| comment_count(&d.entries)).sum();
        assert_eq!(total, directives.len());
    }

    #[test]
    fn missing_directive_fails() {
        let mut c = comment("Doc // Sec", 7);
        c.tags.clear();
        let err = build(vec![c], "mkdocs").unwrap_err();
        assert_eq!(err.to_string(), "a.js:7: comment has no @mkdocs directive");
    }
}
