//! Block doc comment parser.
//!
//! Extracts `/** ... */` blocks from C-family sources (JavaScript,
//! TypeScript, Java, PHP, Rust, ...):
//! - leading `*` decoration is stripped from every line
//! - lines before the first `@tag` form the description
//! - `@tag text` starts a tag; following non-tag lines continue it

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)\s*(.*)$").unwrap());

static RE_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*(?:\s|$)?").unwrap());

/// A comment line with its 1-based line number.
type Line = (usize, String);

/// Parse every doc block in `input`.
pub fn parse(input: &str, file: &str) -> Vec<RawComment> {
    let mut comments = Vec::new();
    let mut block: Option<(usize, Vec<Line>)> = None;

    for (idx, line) in input.lines().enumerate() {
        let lineno = idx + 1;

        match block.as_mut() {
            None => {
                let Some(start) = line.find("/**") else {
                    continue;
                };
                let rest = &line[start + 3..];
                // `/**/` is an empty ordinary comment
                if rest.starts_with('/') {
                    continue;
                }
                if let Some(end) = rest.find("*/") {
                    let body = vec![(lineno, clean_line(&rest[..end]))];
                    comments.push(build_comment(lineno, body, file));
                } else {
                    block = Some((lineno, vec![(lineno, clean_line(rest))]));
                }
            }
            Some((_, lines)) => {
                if let Some(end) = line.find("*/") {
                    lines.push((lineno, clean_line(&line[..end])));
                    if let Some((start, lines)) = block.take() {
                        comments.push(build_comment(start, lines, file));
                    }
                } else {
                    lines.push((lineno, clean_line(line)));
                }
            }
        }
    }

    comments
}

/// Strip the `*` gutter and surrounding whitespace from one line.
fn clean_line(line: &str) -> String {
    RE_DECORATION.replace(line, "").trim().to_string()
}

fn build_comment(start: usize, lines: Vec<Line>, file: &str) -> RawComment {
    let mut description: Vec<String> = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();

    for (lineno, text) in lines {
        if let Some(caps) = RE_TAG.captures(&text) {
            tags.push(Tag {
                tag: caps[1].to_string(),
                raw: caps[2].trim().to_string(),
                line: lineno,
            });
            continue;
        }
        match tags.last_mut() {
            // Continuation of the previous tag
            Some(tag) => {
                if !text.is_empty() {
                    if !tag.raw.is_empty() {
                        tag.raw.push(' ');
                    }
                    tag.raw.push_str(&text);
                }
            }
            None => description.push(text),
        }
    }

    RawComment {
        description: description.join("\n").trim().to_string(),
        tags,
        source: Source {
            file: file.to_string(),
            line: start,
        },
    }
}
