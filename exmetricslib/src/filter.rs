//! File filtering and discovery with glob pattern support.
//!
//! This module discovers Elixir source files with support for include/exclude
//! glob patterns and a configurable set of file suffixes.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::ExmetricsError;
use crate::Result;

/// File suffixes recognized as Elixir sources by default.
pub const DEFAULT_SUFFIXES: &[&str] = &["ex", "exs"];

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// File extensions (without the dot) treated as Elixir sources
    pub suffixes: Vec<String>,
    /// Glob patterns to include (if empty, include all Elixir files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create a new filter config (includes all `.ex` and `.exs` files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the recognized file suffixes. A leading dot is ignored.
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.suffixes = suffixes
            .into_iter()
            .map(|s| s.as_ref().trim_start_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Whether the path has one of the configured suffixes.
    pub fn has_suffix(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.suffixes.iter().any(|s| s == ext))
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. It has an Elixir suffix
    /// 2. It matches at least one include pattern (or include is empty)
    /// 3. It doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        if !self.has_suffix(path) {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| ExmetricsError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    // Hidden directories plus Mix build output and fetched dependencies
    name.starts_with('.') || name == "_build" || name == "deps"
}

/// Discover Elixir source files in a directory.
///
/// Walks the directory tree and returns all files that match the filter,
/// sorted by path.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(ExmetricsError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !should_skip_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("lib/app")).unwrap();
        fs::create_dir_all(dir.join("test")).unwrap();
        fs::create_dir_all(dir.join("_build/dev")).unwrap();
        fs::create_dir_all(dir.join("deps/jason/lib")).unwrap();
        fs::create_dir_all(dir.join(".elixir_ls")).unwrap();

        fs::write(dir.join("mix.exs"), "defmodule App.MixProject do\nend\n").unwrap();
        fs::write(dir.join("lib/app.ex"), "defmodule App do\nend\n").unwrap();
        fs::write(dir.join("lib/app/worker.ex"), "defmodule App.Worker do\nend\n").unwrap();
        fs::write(dir.join("test/app_test.exs"), "defmodule AppTest do\nend\n").unwrap();
        fs::write(dir.join("_build/dev/gen.ex"), "# generated").unwrap();
        fs::write(dir.join("deps/jason/lib/jason.ex"), "defmodule Jason do\nend\n").unwrap();
        fs::write(dir.join(".elixir_ls/cache.ex"), "# hidden").unwrap();
        fs::write(dir.join("README.md"), "# Readme").unwrap();
    }

    #[test]
    fn test_filter_matches_elixir_files() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("lib/app.ex")));
        assert!(filter.matches(Path::new("test/app_test.exs")));
        assert!(!filter.matches(Path::new("README.md")));
        assert!(!filter.matches(Path::new("mix.lock")));
        assert!(!filter.matches(Path::new("lib/app.ex.bak")));
    }

    #[test]
    fn test_filter_custom_suffixes() {
        let filter = FilterConfig::new().with_suffixes([".ex", "eex", ""]);

        assert_eq!(filter.suffixes, vec!["ex".to_string(), "eex".to_string()]);
        assert!(filter.matches(Path::new("lib/page.eex")));
        assert!(!filter.matches(Path::new("test/app_test.exs")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("**/lib/**").unwrap();

        assert!(filter.matches(Path::new("project/lib/app.ex")));
        assert!(filter.matches(Path::new("project/lib/app/worker.ex")));
        assert!(!filter.matches(Path::new("project/test/app_test.exs")));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("**/test/**").unwrap();

        assert!(filter.matches(Path::new("project/lib/app.ex")));
        assert!(!filter.matches(Path::new("project/test/app_test.exs")));
    }

    #[test]
    fn test_filter_with_multiple_patterns() {
        let filter = FilterConfig::new()
            .include_many(&["**/lib/**", "**/test/**"])
            .unwrap()
            .exclude_many(&["**/worker.ex"])
            .unwrap();

        assert!(filter.matches(Path::new("project/lib/app.ex")));
        assert!(filter.matches(Path::new("project/test/app_test.exs")));
        assert!(!filter.matches(Path::new("project/lib/app/worker.ex")));
        assert!(!filter.matches(Path::new("project/mix.exs")));
    }

    #[test]
    fn test_discover_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert_eq!(files.len(), 4);
        assert!(files.iter().any(|p| p.ends_with("mix.exs")));
        assert!(files.iter().any(|p| p.ends_with("lib/app.ex")));
        assert!(files.iter().any(|p| p.ends_with("lib/app/worker.ex")));
        assert!(files.iter().any(|p| p.ends_with("test/app_test.exs")));

        assert!(!files.iter().any(|p| p.to_string_lossy().contains("_build")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains("deps")));
        assert!(!files
            .iter()
            .any(|p| p.to_string_lossy().contains(".elixir_ls")));

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_files_with_filter() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::new().exclude("**/test/**").unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();

        assert!(files.iter().any(|p| p.ends_with("lib/app.ex")));
        assert!(!files.iter().any(|p| p.ends_with("test/app_test.exs")));
    }

    #[test]
    fn test_discover_single_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("single.ex");
        fs::write(&file_path, "defmodule Single do\nend\n").unwrap();

        let files = discover_files(&file_path, &FilterConfig::new()).unwrap();

        assert_eq!(files, vec![file_path]);
    }

    #[test]
    fn test_discover_files_nonexistent() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());

        assert!(matches!(result, Err(ExmetricsError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        if let Err(ExmetricsError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
