//! Host adapter: run the scanner over a set of files and publish measures.
//!
//! The host side is reduced to two traits. A [`SourceProvider`] enumerates
//! the Elixir files to analyse and reads their lines; a [`MeasureSink`]
//! receives the scan result of every file that could be read.
//! [`MeasureSensor`] connects the two.
//!
//! A file that cannot be read (vanished, unreadable, not UTF-8) is skipped
//! with a warning. Nothing is published for it and the remaining files are
//! still processed.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::filter::{discover_files, FilterConfig};
use crate::scanner::{read_lines, LineScanner};
use crate::stats::ScanResult;
use crate::Result;

/// Supplies the files of one language and their contents.
pub trait SourceProvider {
    /// List the files to analyse, in processing order.
    fn files(&self) -> Result<Vec<PathBuf>>;

    /// Read the ordered lines of a file, terminators stripped.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
}

/// Receives the scan result of each successfully read file.
pub trait MeasureSink {
    fn publish(&mut self, path: &Path, scan: &ScanResult);
}

/// [`SourceProvider`] over a directory tree (or a single file) on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    filter: FilterConfig,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, filter: FilterConfig) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }
}

impl SourceProvider for DirectorySource {
    fn files(&self) -> Result<Vec<PathBuf>> {
        discover_files(&self.root, &self.filter)
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        read_lines(path)
    }
}

/// Outcome of one sensor run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSummary {
    /// Files scanned and published
    pub analysed: usize,
    /// Files that could not be read
    pub skipped: Vec<PathBuf>,
}

/// Drives the [`LineScanner`] over every file of a [`SourceProvider`].
pub struct MeasureSensor<P: SourceProvider> {
    provider: P,
}

impl<P: SourceProvider> MeasureSensor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Whether there is anything to analyse.
    pub fn should_execute(&self) -> bool {
        self.provider
            .files()
            .map(|files| !files.is_empty())
            .unwrap_or(false)
    }

    /// Scan every file and publish its result to `sink`.
    ///
    /// Only a failure to enumerate files is returned as an error; per-file
    /// read failures are logged and listed in the summary.
    pub fn analyse<S: MeasureSink>(&self, sink: &mut S) -> Result<SensorSummary> {
        info!("[elixir] analyse");
        let files = self.provider.files()?;
        let mut scanner = LineScanner::new();
        let mut summary = SensorSummary::default();

        for path in files {
            match self.provider.read_lines(&path) {
                Ok(lines) => {
                    debug!("[elixir] processing file: {}", path.display());
                    let scan = scanner.parse(&lines);
                    sink.publish(&path, &scan);
                    summary.analysed += 1;
                }
                Err(e) => {
                    warn!("[elixir] could not process file: {} ({e})", path.display());
                    summary.skipped.push(path);
                }
            }
        }

        Ok(summary)
    }
}
