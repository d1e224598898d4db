//! Core data structures for scan results and derived measures

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Raw counters produced by one pass of the line scanner.
///
/// Results of several files can be summed to get aggregated counts; derived
/// measures should then be computed from the sum, not summed themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Number of input lines
    pub line_count: u64,
    /// Empty or whitespace-only lines
    pub empty_line_count: u64,
    /// Lines counted as comments (`#` lines and documentation)
    pub comment_line_count: u64,
    /// `defmodule` definitions
    pub class_count: u64,
    /// `def` definitions
    pub public_function_count: u64,
    /// `defp` definitions
    pub private_function_count: u64,
    /// Modules carrying an enabled `@moduledoc`
    pub documented_class_count: u64,
    /// `def` definitions preceded by an enabled `@doc`
    pub documented_public_function_count: u64,
    /// `defp` definitions preceded by an enabled `@doc`
    pub documented_private_function_count: u64,
}

impl ScanResult {
    /// Create a new result with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Public plus private function definitions
    pub fn function_count(&self) -> u64 {
        self.public_function_count + self.private_function_count
    }

    /// Public functions plus modules
    pub fn public_api(&self) -> u64 {
        self.public_function_count + self.class_count
    }

    /// Documented public functions plus documented modules
    pub fn documented_api(&self) -> u64 {
        self.documented_public_function_count + self.documented_class_count
    }

    /// Derive the named measures from these counters
    pub fn measures(&self) -> Measures {
        Measures::from_scan(self)
    }
}

impl Add for ScanResult {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            line_count: self.line_count + other.line_count,
            empty_line_count: self.empty_line_count + other.empty_line_count,
            comment_line_count: self.comment_line_count + other.comment_line_count,
            class_count: self.class_count + other.class_count,
            public_function_count: self.public_function_count + other.public_function_count,
            private_function_count: self.private_function_count + other.private_function_count,
            documented_class_count: self.documented_class_count + other.documented_class_count,
            documented_public_function_count: self.documented_public_function_count
                + other.documented_public_function_count,
            documented_private_function_count: self.documented_private_function_count
                + other.documented_private_function_count,
        }
    }
}

impl AddAssign for ScanResult {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Names of the measures published for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Lines,
    Ncloc,
    CommentLines,
    Classes,
    Functions,
    PublicApi,
    PublicUndocumentedApi,
    PublicDocumentedApiDensity,
}

impl Metric {
    /// Every metric, in publication order
    pub const ALL: [Metric; 8] = [
        Metric::Lines,
        Metric::Ncloc,
        Metric::CommentLines,
        Metric::Classes,
        Metric::Functions,
        Metric::PublicApi,
        Metric::PublicUndocumentedApi,
        Metric::PublicDocumentedApiDensity,
    ];

    /// Stable key used in serialized output
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Lines => "lines",
            Metric::Ncloc => "ncloc",
            Metric::CommentLines => "comment_lines",
            Metric::Classes => "classes",
            Metric::Functions => "functions",
            Metric::PublicApi => "public_api",
            Metric::PublicUndocumentedApi => "public_undocumented_api",
            Metric::PublicDocumentedApiDensity => "public_documented_api_density",
        }
    }
}

impl Metric {
    /// Short column label for tabular output
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Lines => "Lines",
            Metric::Ncloc => "NCLOC",
            Metric::CommentLines => "Comments",
            Metric::Classes => "Classes",
            Metric::Functions => "Functions",
            Metric::PublicApi => "API",
            Metric::PublicUndocumentedApi => "Undoc",
            Metric::PublicDocumentedApiDensity => "Doc %",
        }
    }

    /// Whether the value is a percentage rather than a count
    pub fn is_ratio(&self) -> bool {
        matches!(self, Metric::PublicDocumentedApiDensity)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Code-quality measures derived from a [`ScanResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    /// Total lines
    pub lines: u64,
    /// Lines that are neither blank nor comments
    pub ncloc: u64,
    /// Comment and documentation lines
    pub comment_lines: u64,
    /// Module definitions
    pub classes: u64,
    /// Public and private functions
    pub functions: u64,
    /// Public functions plus modules
    pub public_api: u64,
    /// Public API items without documentation
    pub public_undocumented_api: u64,
    /// Percentage of documented public API, two decimals
    pub public_documented_api_density: f64,
}

impl Measures {
    /// Compute all measures from raw counters.
    ///
    /// A line can be both blank and a comment (blank lines inside a
    /// documentation heredoc), so `ncloc` saturates at zero.
    pub fn from_scan(scan: &ScanResult) -> Self {
        let public_api = scan.public_api();
        let documented_api = scan.documented_api();

        let density = if public_api == 0 {
            100.0
        } else {
            scale(documented_api as f64 / public_api as f64 * 100.0)
        };

        Self {
            lines: scan.line_count,
            ncloc: scan
                .line_count
                .saturating_sub(scan.empty_line_count)
                .saturating_sub(scan.comment_line_count),
            comment_lines: scan.comment_line_count,
            classes: scan.class_count,
            functions: scan.function_count(),
            public_api,
            public_undocumented_api: public_api.saturating_sub(documented_api),
            public_documented_api_density: density,
        }
    }

    /// Value of a single metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Lines => self.lines as f64,
            Metric::Ncloc => self.ncloc as f64,
            Metric::CommentLines => self.comment_lines as f64,
            Metric::Classes => self.classes as f64,
            Metric::Functions => self.functions as f64,
            Metric::PublicApi => self.public_api as f64,
            Metric::PublicUndocumentedApi => self.public_undocumented_api as f64,
            Metric::PublicDocumentedApiDensity => self.public_documented_api_density,
        }
    }

    /// All metrics with their values, in publication order
    pub fn entries(&self) -> Vec<(Metric, f64)> {
        Metric::ALL.iter().map(|m| (*m, self.value(*m))).collect()
    }
}

/// Round half-up to two decimal places.
fn scale(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scan result for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeasures {
    /// Path to the file
    pub path: PathBuf,
    /// Raw counters for this file
    pub scan: ScanResult,
}

impl FileMeasures {
    /// Create new file measures
    pub fn new(path: PathBuf, scan: ScanResult) -> Self {
        Self { path, scan }
    }

    /// Derived measures for this file
    pub fn measures(&self) -> Measures {
        self.scan.measures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanResult {
        ScanResult {
            line_count: 21,
            empty_line_count: 4,
            comment_line_count: 3,
            class_count: 1,
            public_function_count: 4,
            private_function_count: 0,
            documented_class_count: 1,
            documented_public_function_count: 2,
            documented_private_function_count: 0,
        }
    }

    #[test]
    fn test_scan_result_default() {
        let scan = ScanResult::new();
        assert_eq!(scan.line_count, 0);
        assert_eq!(scan.function_count(), 0);
        assert_eq!(scan.public_api(), 0);
    }

    #[test]
    fn test_scan_result_add() {
        let sum = sample() + sample();
        assert_eq!(sum.line_count, 42);
        assert_eq!(sum.class_count, 2);
        assert_eq!(sum.documented_public_function_count, 4);

        let mut acc = ScanResult::new();
        acc += sample();
        assert_eq!(acc, sample());
    }

    #[test]
    fn test_measures_from_scan() {
        let m = sample().measures();
        assert_eq!(m.lines, 21);
        assert_eq!(m.ncloc, 14);
        assert_eq!(m.comment_lines, 3);
        assert_eq!(m.classes, 1);
        assert_eq!(m.functions, 4);
        assert_eq!(m.public_api, 5);
        assert_eq!(m.public_undocumented_api, 2);
        assert_eq!(m.public_documented_api_density, 60.0);
    }

    #[test]
    fn test_density_without_public_api() {
        let scan = ScanResult {
            line_count: 3,
            private_function_count: 2,
            ..Default::default()
        };
        let m = scan.measures();
        assert_eq!(m.public_api, 0);
        assert_eq!(m.public_undocumented_api, 0);
        assert_eq!(m.public_documented_api_density, 100.0);
    }

    #[test]
    fn test_density_rounds_to_two_decimals() {
        let scan = ScanResult {
            public_function_count: 3,
            documented_public_function_count: 1,
            ..Default::default()
        };
        assert_eq!(scan.measures().public_documented_api_density, 33.33);

        let scan = ScanResult {
            public_function_count: 3,
            documented_public_function_count: 2,
            ..Default::default()
        };
        assert_eq!(scan.measures().public_documented_api_density, 66.67);
    }

    #[test]
    fn test_ncloc_saturates() {
        let scan = ScanResult {
            line_count: 3,
            empty_line_count: 1,
            comment_line_count: 3,
            ..Default::default()
        };
        assert_eq!(scan.measures().ncloc, 0);
    }

    #[test]
    fn test_entries_order_and_keys() {
        let entries = sample().measures().entries();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0], (Metric::Lines, 21.0));
        assert_eq!(entries[1], (Metric::Ncloc, 14.0));
        assert_eq!(entries[7].0, Metric::PublicDocumentedApiDensity);
        assert_eq!(Metric::PublicUndocumentedApi.key(), "public_undocumented_api");
        assert_eq!(Metric::CommentLines.to_string(), "comment_lines");
    }

    #[test]
    fn test_metric_labels() {
        let labels: Vec<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(
            labels,
            vec!["Lines", "NCLOC", "Comments", "Classes", "Functions", "API", "Undoc", "Doc %"]
        );
        assert!(Metric::PublicDocumentedApiDensity.is_ratio());
        assert!(!Metric::Ncloc.is_ratio());
    }
}
