//! Data model for extracted comments and the document tree built from them.

use std::fmt;

/// A documentation comment as read from a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComment {
    /// Free text before the first tag (summary + body)
    pub description: String,
    /// Tags in source order
    pub tags: Vec<Tag>,
    pub source: Source,
}

impl RawComment {
    /// All tags of the given type, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.tag == name)
    }
}

/// A single `@tag raw text` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Tag type without the leading `@`
    pub tag: String,
    /// Everything after the tag type, continuation lines joined by a space
    pub raw: String,
    pub line: usize,
}

/// Where a comment came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub file: String,
    pub line: usize,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

// -- Document tree ------------------------------------------------------------

/// One output document: a named root owning pages and sections.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocumentTree {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// An intermediate nesting level below a document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageNode {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// A named, ordered list of comments rendered together in one file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub comments: Vec<RawComment>,
}

/// Child of a document or page. Pages and sections share one list so that
/// first-seen order holds across both kinds.
#[derive(Debug, PartialEq, Eq)]
pub enum Entry {
    Page(PageNode),
    Section(Section),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Page(page) => &page.name,
            Entry::Section(section) => &section.name,
        }
    }
}

// -- Diagnostics --------------------------------------------------------------

/// A tag whose text did not match its expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: Source,
    pub tag: String,
    pub raw: String,
    pub reason: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: @{} {}: {:?}",
            self.source, self.tag, self.reason, self.raw
        )
    }
}
