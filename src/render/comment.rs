//! Markdown rendering of a single comment.
//!
//! Output order is fixed: name/description heading, free description text,
//! parameter table, data table, returns. Families without tags are omitted.
//! Tags that do not match their shape never abort rendering: they produce a
//! visibly marked placeholder plus a [`Diagnostic`].

use crate::error::TagError;
use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(.+)$").unwrap());

static RE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([^}]+)\}\s+(\S+)\s*(?:-(?:\s+|$))?(.*)$").unwrap());

static RE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([^}]+)\}\s*(.*)$").unwrap());

pub const DESCRIPTION_TAG: &str = "desc";
const RETURNS_TAGS: &[&str] = &["returns", "return"];

/// A tabular tag family: heading title and the tag names that feed it.
struct Family {
    title: &'static str,
    tags: &'static [&'static str],
}

const TABLE_FAMILIES: &[Family] = &[
    Family {
        title: "Parameters",
        tags: &["param", "arg", "argument"],
    },
    Family {
        title: "Data",
        tags: &["data"],
    },
];

/// Markdown for one comment plus any problems found on the way.
#[derive(Debug, Default)]
pub struct Rendered {
    pub markdown: String,
    pub diagnostics: Vec<Diagnostic>,
}

// -- Tag shapes ---------------------------------------------------------------

/// `<name> - <description>`
#[derive(Debug, PartialEq, Eq)]
pub struct DescriptionFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// `{<type>} <name> - <description>`
#[derive(Debug, PartialEq, Eq)]
pub struct RowFields<'a> {
    pub ty: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

/// `{<type>} <description>`
#[derive(Debug, PartialEq, Eq)]
pub struct ReturnsFields<'a> {
    pub ty: &'a str,
    pub description: &'a str,
}

pub fn parse_description(raw: &str) -> Result<DescriptionFields<'_>, TagError> {
    let caps = RE_DESCRIPTION.captures(raw).ok_or(TagError::Description)?;
    Ok(DescriptionFields {
        name: caps.get(1).map_or("", |m| m.as_str()),
        description: caps.get(2).map_or("", |m| m.as_str().trim()),
    })
}

pub fn parse_row(raw: &str) -> Result<RowFields<'_>, TagError> {
    let caps = RE_ROW.captures(raw).ok_or(TagError::Row)?;
    Ok(RowFields {
        ty: caps.get(1).map_or("", |m| m.as_str().trim()),
        name: caps.get(2).map_or("", |m| m.as_str()),
        description: caps.get(3).map_or("", |m| m.as_str().trim()),
    })
}

pub fn parse_returns(raw: &str) -> Result<ReturnsFields<'_>, TagError> {
    let caps = RE_RETURNS.captures(raw).ok_or(TagError::Returns)?;
    Ok(ReturnsFields {
        ty: caps.get(1).map_or("", |m| m.as_str().trim()),
        description: caps.get(2).map_or("", |m| m.as_str().trim()),
    })
}

// -- Rendering ----------------------------------------------------------------

/// Render one comment to a self-contained Markdown fragment.
pub fn render_comment(comment: &RawComment) -> Rendered {
    let mut lines: Vec<String> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // Heading
    match comment.tags_named(DESCRIPTION_TAG).next() {
        Some(tag) => match parse_description(&tag.raw) {
            Ok(fields) => {
                lines.push(format!("### {}\n", fields.name));
                lines.push(fields.description.to_string());
                lines.push(String::new());
            }
            Err(e) => {
                lines.push(format!("> **Malformed @{}:** {}", DESCRIPTION_TAG, tag.raw));
                lines.push(String::new());
                diagnostics.push(diagnostic(comment, tag, e.to_string()));
            }
        },
        None => diagnostics.push(Diagnostic {
            source: comment.source.clone(),
            tag: DESCRIPTION_TAG.to_string(),
            raw: String::new(),
            reason: "missing tag".to_string(),
        }),
    }

    if !comment.description.is_empty() {
        lines.push(comment.description.clone());
        lines.push(String::new());
    }

    for family in TABLE_FAMILIES {
        let tags: Vec<&Tag> = comment
            .tags
            .iter()
            .filter(|t| family.tags.contains(&t.tag.as_str()))
            .collect();
        if tags.is_empty() {
            continue;
        }

        lines.push(format!("#### {}\n", family.title));
        lines.push("| Name | Type | Description |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for tag in tags {
            match parse_row(&tag.raw) {
                Ok(row) => lines.push(format!(
                    "| `{}` | `{}` | {} |",
                    escape_cell(row.name),
                    escape_cell(row.ty),
                    escape_cell(row.description)
                )),
                Err(e) => {
                    lines.push(format!("| ⚠ | | {} |", escape_cell(&tag.raw)));
                    diagnostics.push(diagnostic(comment, tag, e.to_string()));
                }
            }
        }
        lines.push(String::new());
    }

    if let Some(tag) = comment.tags.iter().find(|t| RETURNS_TAGS.contains(&t.tag.as_str())) {
        match parse_returns(&tag.raw) {
            Ok(ret) => {
                lines.push("#### Returns\n".to_string());
                if ret.description.is_empty() {
                    lines.push(format!("`{}`", ret.ty));
                } else {
                    lines.push(format!("`{}` {}", ret.ty, ret.description));
                }
                lines.push(String::new());
            }
            Err(e) => diagnostics.push(diagnostic(comment, tag, e.to_string())),
        }
    }

    let mut markdown = lines.join("\n");
    if !markdown.is_empty() {
        markdown.push('\n');
    }
    Rendered {
        markdown,
        diagnostics,
    }
}

fn diagnostic(comment: &RawComment, tag: &Tag, reason: String) -> Diagnostic {
    Diagnostic {
        source: Source {
            file: comment.source.file.clone(),
            line: tag.line,
        },
        tag: tag.tag.clone(),
        raw: tag.raw.clone(),
        reason,
    }
}

/// Keep table cells on one line and away from column separators.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
