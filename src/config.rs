//! Run configuration, resolved once from the command line.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Tag name that carries the `document // page // section` placement.
pub const DEFAULT_DIRECTIVE: &str = "mkdocs";

/// File extensions scanned when a directory is given as input.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "java", "php", "c", "h", "cpp", "rs", "go",
    "swift", "kt", "scala",
];

/// Settings shared by discovery, extraction, rendering and writing.
#[derive(Debug)]
pub struct Config {
    /// Input paths, directories or glob patterns
    pub inputs: Vec<String>,
    /// Root under which one directory per document is written
    pub output: PathBuf,
    pub directive: String,
    pub extensions: Vec<String>,
    /// Paths matching any of these are dropped
    pub exclude: Vec<Regex>,
    /// Glob patterns read from the ignore file
    pub ignore: Vec<glob::Pattern>,
}

impl Config {
    /// Compile exclude regexes and load the ignore file.
    pub fn new(
        inputs: Vec<String>,
        output: PathBuf,
        directive: String,
        extensions: Vec<String>,
        exclude: &[String],
        ignore_file: Option<&Path>,
    ) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|re| Regex::new(re).with_context(|| format!("invalid exclude pattern: {}", re)))
            .collect::<Result<Vec<_>>>()?;

        let ignore = match ignore_file {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("failed to read ignore file: {}", path.display()))?;
                parse_ignore_list(&content)?
            }
            None => Vec::new(),
        };

        let extensions = if extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        };

        Ok(Config {
            inputs: if inputs.is_empty() {
                vec![".".to_string()]
            } else {
                inputs
            },
            output,
            directive: directive.trim_start_matches('@').to_string(),
            extensions,
            exclude,
            ignore,
        })
    }

    /// Whether a discovered path should be dropped.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.exclude.iter().any(|re| re.is_match(&text))
            || self.ignore.iter().any(|pat| {
                pat.matches_path(path)
                    || path
                        .components()
                        .any(|c| pat.matches(&c.as_os_str().to_string_lossy()))
            })
    }

    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Parse an ignore file: one glob per line, blank lines and `#` comments skipped.
fn parse_ignore_list(content: &str) -> Result<Vec<glob::Pattern>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let line = line.trim_end_matches('/');
            glob::Pattern::new(line).with_context(|| format!("invalid ignore pattern: {}", line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(exclude: &[&str], ignore: &str) -> Config {
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        let mut cfg = Config::new(
            vec![],
            PathBuf::from("out"),
            "@mkdocs".to_string(),
            vec![],
            &exclude,
            None,
        )
        .unwrap();
        cfg.ignore = parse_ignore_list(ignore).unwrap();
        cfg
    }

    #[test]
    fn defaults() {
        let cfg = config(&[], "");
        assert_eq!(cfg.inputs, vec!["."]);
        assert_eq!(cfg.directive, "mkdocs");
        assert!(cfg.has_extension(Path::new("src/app.js")));
        assert!(!cfg.has_extension(Path::new("README.md")));
    }

    #[test]
    fn ignore_list_skips_comments() {
        let patterns = parse_ignore_list("# deps\nnode_modules/\n\n*.min.js\n").unwrap();
        assert_eq!(patterns.len(), 2);
    }

    #[test]
    fn ignore_matches_any_component() {
        let cfg = config(&[], "node_modules\n");
        assert!(cfg.is_ignored(Path::new("web/node_modules/lib/a.js")));
        assert!(!cfg.is_ignored(Path::new("web/src/a.js")));
    }

    #[test]
    fn exclude_regex() {
        let cfg = config(&[r"\.test\.js$"], "");
        assert!(cfg.is_ignored(Path::new("src/user.test.js")));
        assert!(!cfg.is_ignored(Path::new("src/user.js")));
    }

    #[test]
    fn invalid_exclude_fails() {
        let err = Config::new(
            vec![],
            PathBuf::from("out"),
            "mkdocs".to_string(),
            vec![],
            &["(".to_string()],
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid exclude pattern"));
    }

    #[test]
    fn custom_extensions_strip_dot() {
        let cfg = Config::new(
            vec![],
            PathBuf::from("out"),
            "mkdocs".to_string(),
            vec![".vue".to_string()],
            &[],
            None,
        )
        .unwrap();
        assert!(cfg.has_extension(Path::new("App.vue")));
        assert!(!cfg.has_extension(Path::new("app.js")));
    }
}
