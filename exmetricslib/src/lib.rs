//! # exmetricslib
//!
//! Line-oriented source metrics for Elixir: lines of code, comment lines and
//! public API documentation coverage.
//!
//! ## Overview
//!
//! Each file is scanned once, line by line, with a handful of surface-syntax
//! patterns. The scan yields raw counters ([`ScanResult`]):
//!
//! - **Lines** and **blank lines**
//! - **Comment lines**: `#` comments plus `@doc`/`@moduledoc`/`@typedoc`
//!   annotations, including the bodies of documentation heredocs
//! - **Modules** (`defmodule`) and **functions** (`def`, `defp`)
//! - **Documented** modules and functions, where an annotation was not
//!   disabled with `false` or `nil`
//!
//! From these, [`Measures`] derives NCLOC, public API size, undocumented
//! public API and the documented API density.
//!
//! ## Features
//!
//! - **No parser**: a single forward pass per file
//! - **Glob filtering**: include/exclude patterns and configurable suffixes
//! - **Host adapter**: [`SourceProvider`] and [`MeasureSink`] let any host
//!   feed files in and collect measures; unreadable files are skipped with a
//!   warning
//!
//! ## Example
//!
//! ```rust
//! use exmetricslib::{count_directory, count_str, CountOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let source = "defmodule Greeter do\n  @doc \"Says hi.\"\n  def hello, do: :hi\nend\n";
//! let scan = count_str(source);
//! assert_eq!(scan.public_function_count, 1);
//! assert_eq!(scan.documented_public_function_count, 1);
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("lib")).unwrap();
//! fs::write(dir.path().join("lib/greeter.ex"), source).unwrap();
//!
//! let result = count_directory(dir.path(), CountOptions::new()).unwrap();
//! assert_eq!(result.file_count, 1);
//! assert_eq!(result.total_measures().ncloc, 3);
//! ```

pub mod counter;
pub mod error;
pub mod filter;
pub mod options;
pub mod scanner;
pub mod sensor;
pub mod stats;

pub use counter::{count_directory, count_file, count_str, CountOptions, CountResult};
pub use error::ExmetricsError;
pub use filter::{discover_files, FilterConfig, DEFAULT_SUFFIXES};
pub use options::{Aggregation, OrderBy, OrderDirection, Ordering};
pub use scanner::{parse_file, parse_lines, parse_str, read_lines, LineScanner};
pub use sensor::{DirectorySource, MeasureSensor, MeasureSink, SensorSummary, SourceProvider};
pub use stats::{FileMeasures, Measures, Metric, ScanResult};

/// Result type for exmetricslib operations
pub type Result<T> = std::result::Result<T, ExmetricsError>;
