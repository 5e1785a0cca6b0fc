//! Run outcome and its console summary.
//!
//! Formatting is pure (returns lines) so it can be tested without capturing
//! stdout; `main` prints the lines.

use crate::error::WriteError;
use crate::writer::DocumentReport;

/// What a run produced.
#[derive(Debug)]
pub enum Outcome {
    /// No comment carried the directive
    NothingToDo,
    Generated(Vec<DocumentReport>),
}

impl Outcome {
    /// True when documents were attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        match self {
            Outcome::NothingToDo => false,
            Outcome::Generated(reports) => {
                !reports.is_empty() && reports.iter().all(|r| r.result.is_err())
            }
        }
    }
}

/// One header line per document, followed by its written paths or errors.
pub fn format_summary(outcome: &Outcome, directive: &str) -> Vec<String> {
    let reports = match outcome {
        Outcome::NothingToDo => {
            return vec![format!(
                "nothing to do: no comments with an @{} directive",
                directive
            )]
        }
        Outcome::Generated(reports) => reports,
    };

    let mut lines = Vec::new();
    for report in reports {
        let warnings = match report.diagnostics.len() {
            0 => String::new(),
            1 => ", 1 warning".to_string(),
            n => format!(", {} warnings", n),
        };
        match &report.result {
            Ok(paths) => {
                lines.push(format!(
                    "{}: ok ({} files{})",
                    report.name,
                    paths.len(),
                    warnings
                ));
                for path in paths {
                    lines.push(format!("    {}", path.display()));
                }
            }
            Err(err) => {
                lines.push(format!("{}: failed: {}{}", report.name, err, warnings));
                if let WriteError::Files { failures, .. } = err {
                    for (path, e) in failures {
                        lines.push(format!("    {}: {}", path.display(), e));
                    }
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Diagnostic, Source};
    use std::io;
    use std::path::PathBuf;

    fn ok(name: &str, paths: &[&str], diagnostics: usize) -> DocumentReport {
        DocumentReport {
            name: name.to_string(),
            diagnostics: (0..diagnostics)
                .map(|_| Diagnostic {
                    source: Source::default(),
                    tag: "param".to_string(),
                    raw: "x".to_string(),
                    reason: "bad".to_string(),
                })
                .collect(),
            result: Ok(paths.iter().map(PathBuf::from).collect()),
        }
    }

    fn failed(name: &str) -> DocumentReport {
        DocumentReport {
            name: name.to_string(),
            diagnostics: Vec::new(),
            result: Err(WriteError::Files {
                failures: vec![(
                    PathBuf::from("out/B/docs/x.md"),
                    io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                )],
                total: 2,
            }),
        }
    }

    #[test]
    fn nothing_to_do() {
        let outcome = Outcome::NothingToDo;
        assert!(!outcome.all_failed());
        assert_eq!(
            format_summary(&outcome, "mkdocs"),
            ["nothing to do: no comments with an @mkdocs directive"]
        );
    }

    #[test]
    fn mixed_results() {
        let outcome = Outcome::Generated(vec![
            ok("A", &["out/A/docs/index.md", "out/A/mkdocs.yml"], 2),
            failed("B"),
        ]);
        assert!(!outcome.all_failed());
        assert_eq!(
            format_summary(&outcome, "mkdocs"),
            [
                "A: ok (2 files, 2 warnings)",
                "    out/A/docs/index.md",
                "    out/A/mkdocs.yml",
                "B: failed: 1 of 2 files failed to write",
                "    out/B/docs/x.md: denied",
            ]
        );
    }

    #[test]
    fn all_failed() {
        assert!(Outcome::Generated(vec![failed("A"), failed("B")]).all_failed());
        assert!(!Outcome::Generated(vec![]).all_failed());
    }
}
