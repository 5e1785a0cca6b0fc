//! Input file discovery: explicit files, directories and glob patterns.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Expand the configured inputs into a sorted, deduplicated list of files.
///
/// Explicit files are kept whatever their extension. Directories are walked
/// recursively for supported extensions. Anything else is treated as a glob.
/// Ignore and exclude rules apply to every result.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in &config.inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            walk_dir(path, config, &mut files);
            continue;
        }
        let matches: Vec<_> = glob::glob(input)
            .with_context(|| format!("invalid glob pattern: {}", input))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", input);
        }
        files.extend(matches);
    }

    files.retain(|p| {
        let ignored = config.is_ignored(p);
        if ignored {
            debug!("ignoring {}", p.display());
        }
        !ignored
    });
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, config: &Config, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        // Prune ignored directories without descending into them
        .filter_entry(|e| e.depth() == 0 || !config.is_ignored(e.path()));
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() && config.has_extension(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable entry under {}: {}", dir.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(inputs: Vec<String>, exclude: &[String]) -> Config {
        Config::new(
            inputs,
            PathBuf::from("out"),
            "mkdocs".to_string(),
            vec![],
            exclude,
            None,
        )
        .unwrap()
    }

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn walks_directories_recursively() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.js");
        let b = touch(dir.path(), "nested/deep/b.ts");
        touch(dir.path(), "notes.md");

        let cfg = config_for(vec![dir.path().to_string_lossy().to_string()], &[]);
        let files = discover(&cfg).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn explicit_file_kept_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let notes = touch(dir.path(), "notes.md");

        let cfg = config_for(vec![notes.to_string_lossy().to_string()], &[]);
        assert_eq!(discover(&cfg).unwrap(), vec![notes]);
    }

    #[test]
    fn glob_and_exclude() {
        let dir = TempDir::new().unwrap();
        let keep = touch(dir.path(), "user.js");
        touch(dir.path(), "user.test.js");

        let pattern = format!("{}/*.js", dir.path().display());
        let cfg = config_for(vec![pattern], &[r"\.test\.js$".to_string()]);
        assert_eq!(discover(&cfg).unwrap(), vec![keep]);
    }

    #[test]
    fn duplicates_removed() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.js");
        let input = a.to_string_lossy().to_string();

        let cfg = config_for(vec![input.clone(), input], &[]);
        assert_eq!(discover(&cfg).unwrap(), vec![a]);
    }

    #[test]
    fn unmatched_glob_is_empty() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.nothing", dir.path().display());
        let cfg = config_for(vec![pattern], &[]);
        assert!(discover(&cfg).unwrap().is_empty());
    }
}
