//! High-level counting API.
//!
//! This module provides the main entry points for measuring Elixir sources,
//! with support for glob filtering, per-file breakdowns and ordering.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExmetricsError;
use crate::filter::FilterConfig;
use crate::options::{Aggregation, Ordering};
use crate::scanner::{parse_file, parse_str};
use crate::sensor::{DirectorySource, MeasureSensor, MeasureSink};
use crate::stats::{FileMeasures, Measures, ScanResult};
use crate::Result;

/// Options for counting.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Whether per-file results are kept
    pub aggregation: Aggregation,
    /// Order of per-file results
    pub ordering: Ordering,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set ordering of per-file results.
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Include per-file statistics in results.
    pub fn with_file_stats(self) -> Self {
        self.aggregation(Aggregation::ByFile)
    }
}

/// Result of counting a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Root that was counted
    pub root: PathBuf,
    /// Number of files scanned
    pub file_count: u64,
    /// Counters summed across all scanned files
    pub total: ScanResult,
    /// Per-file results (only with [`Aggregation::ByFile`])
    pub files: Vec<FileMeasures>,
    /// Files that could not be read
    pub skipped: Vec<PathBuf>,
    #[serde(skip)]
    keep_files: bool,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new(root: impl Into<PathBuf>, aggregation: Aggregation) -> Self {
        Self {
            root: root.into(),
            keep_files: aggregation == Aggregation::ByFile,
            ..Default::default()
        }
    }

    /// Measures derived from the summed counters.
    pub fn total_measures(&self) -> Measures {
        self.total.measures()
    }
}

impl MeasureSink for CountResult {
    fn publish(&mut self, path: &Path, scan: &ScanResult) {
        self.file_count += 1;
        self.total += *scan;
        if self.keep_files {
            self.files.push(FileMeasures::new(path.to_path_buf(), *scan));
        }
    }
}

/// Count all Elixir files under a directory (or a single file).
///
/// Unreadable files are skipped and listed in [`CountResult::skipped`].
///
/// # Example
///
/// ```rust,ignore
/// use exmetricslib::{count_directory, Aggregation, CountOptions, FilterConfig};
///
/// let filter = FilterConfig::new().exclude("**/test/**")?;
/// let options = CountOptions::new().filter(filter).aggregation(Aggregation::ByFile);
/// let result = count_directory("lib/", options)?;
/// println!("ncloc: {}", result.total_measures().ncloc);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: CountOptions) -> Result<CountResult> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExmetricsError::PathNotFound(path.to_path_buf()));
    }

    let sensor = MeasureSensor::new(DirectorySource::new(path, options.file_filter));
    let mut result = CountResult::new(path, options.aggregation);
    let summary = sensor.analyse(&mut result)?;

    result.skipped = summary.skipped;
    options.ordering.sort(&mut result.files);

    Ok(result)
}

/// Count a single file. Read failures are returned as errors.
pub fn count_file(path: impl AsRef<Path>) -> Result<ScanResult> {
    parse_file(path)
}

/// Count Elixir source text held in memory.
pub fn count_str(source: &str) -> ScanResult {
    parse_str(source)
}
