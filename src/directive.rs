//! Path directive parsing: `Document // Page // ... // Section`.

use crate::model::RawComment;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*//\s*").unwrap());

/// Placement of a comment: document, zero or more pages, and a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDirective {
    segments: Vec<String>,
}

impl PathDirective {
    /// Split a directive string into trimmed, non-empty segments.
    ///
    /// Returns `None` when nothing but separators and whitespace remain.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<String> = RE_SEPARATOR
            .split(raw.trim())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(PathDirective { segments })
        }
    }

    /// Locate the directive tag on a comment and parse it.
    ///
    /// When the tag appears more than once the first occurrence wins.
    pub fn from_comment(comment: &RawComment, directive: &str) -> Option<Self> {
        let mut found = comment.tags_named(directive);
        let first = found.next()?;
        if found.next().is_some() {
            warn!(
                "{}: multiple @{} tags, using the first ({:?})",
                comment.source, directive, first.raw
            );
        }
        Self::parse(&first.raw)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn document(&self) -> &str {
        &self.segments()[0]
    }

    /// Intermediate segments, outermost first. Empty for one or two segments.
    pub fn pages(&self) -> &[String] {
        let segments = self.segments();
        match segments.len() {
            0..=2 => &[],
            n => &segments[1..n - 1],
        }
    }

    /// The last segment. Equal to the document name for single-segment paths.
    pub fn section(&self) -> &str {
        let segments = self.segments();
        &segments[segments.len() - 1]
    }
}
