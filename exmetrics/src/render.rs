//! Template rendering for CLI output using standout

use std::path::Path;

use console::Style;
use exmetricslib::{CountResult, Measures, Metric, ScanResult};
use serde::Serialize;
use standout::cli::App;
use standout::{Representation, SetupError, TargetProperties, TemplateRef, Theme};

/// Include template at compile time
const STATS_TABLE_TEMPLATE: &str = include_str!("../templates/stats_table.jinja");

const NAME_WIDTH: usize = 40;
const FILE_NAME_WIDTH: usize = 60;
const CELL_WIDTH: usize = 10;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded name (left-aligned, padded to name_width)
    name: String,
    /// Pre-padded cells (right-aligned, one per metric)
    cells: Vec<String>,
}

/// Data context for the stats table template
#[derive(Debug, Serialize)]
struct StatsTableContext {
    /// Pre-padded name column header ("File" or empty)
    name_header: String,
    /// Pre-padded metric column headers
    columns: Vec<String>,
    /// Separator line (dashes)
    separator: String,
    /// Per-file rows, empty unless broken down by file
    rows: Vec<TemplateRow>,
    /// Total row
    total: TemplateRow,
}

/// Per-file entry of the JSON report
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    scan: ScanResult,
    measures: Measures,
}

/// JSON report
#[derive(Debug, Serialize)]
struct Report {
    root: String,
    file_count: u64,
    total: ScanResult,
    measures: Measures,
    files: Vec<FileReport>,
    skipped: Vec<String>,
}

impl Report {
    fn from_result(result: &CountResult, base: &Path) -> Self {
        Self {
            root: result.root.to_string_lossy().to_string(),
            file_count: result.file_count,
            total: result.total,
            measures: result.total_measures(),
            files: result
                .files
                .iter()
                .map(|f| FileReport {
                    path: make_relative(&f.path, base),
                    scan: f.scan,
                    measures: f.measures(),
                })
                .collect(),
            skipped: result
                .skipped
                .iter()
                .map(|p| make_relative(p, base))
                .collect(),
        }
    }
}

/// Map the `--output` value to a representation
pub fn output_mode(name: &str) -> Representation {
    match name {
        "json" => Representation::Json,
        _ => Representation::Human,
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("header", Style::new().bold())
}

/// Convert a path to a relative path from the base directory
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

fn format_cell(metric: Metric, value: f64) -> String {
    let cell = if metric.is_ratio() {
        format!("{:.2}", value)
    } else {
        format!("{}", value as u64)
    };
    format!("{:>width$}", cell, width = CELL_WIDTH)
}

fn to_template_row(name: &str, measures: &Measures, name_width: usize) -> TemplateRow {
    let truncated = truncate_name(name, name_width - 2);
    TemplateRow {
        name: format!("{:<width$}", truncated, width = name_width),
        cells: measures
            .entries()
            .into_iter()
            .map(|(metric, value)| format_cell(metric, value))
            .collect(),
    }
}

fn table_context(result: &CountResult, base: &Path, by_file: bool) -> StatsTableContext {
    let (name_header, name_width) = if by_file {
        ("File", FILE_NAME_WIDTH)
    } else {
        ("", NAME_WIDTH)
    };

    let columns: Vec<String> = Metric::ALL
        .iter()
        .map(|metric| format!("{:>width$}", metric.label(), width = CELL_WIDTH))
        .collect();
    let separator = "-".repeat(name_width + (CELL_WIDTH + 1) * columns.len());

    let rows = if by_file {
        result
            .files
            .iter()
            .map(|f| to_template_row(&make_relative(&f.path, base), &f.measures(), name_width))
            .collect()
    } else {
        Vec::new()
    };

    let total = to_template_row(
        &format!("Total ({} files)", result.file_count),
        &result.total_measures(),
        name_width,
    );

    StatsTableContext {
        name_header: format!("{:<width$}", name_header, width = name_width),
        columns,
        separator,
        rows,
        total,
    }
}

/// Render a count result as a table or as a structured document.
///
/// Structured modes serialize the full report; the template is only used
/// for human output.
pub fn render_count(
    result: &CountResult,
    base: &Path,
    by_file: bool,
    mode: Representation,
) -> Result<String, SetupError> {
    let app = App::builder()
        .theme(create_theme())
        .include_framework_templates(false)
        .build()?;
    let template = TemplateRef::Inline(STATS_TABLE_TEMPLATE.to_string());

    let mut rendered = if mode.is_structured() {
        let report = Report::from_result(result, base);
        app.render_with(template, &report, mode, TargetProperties::detect())?
    } else {
        let context = table_context(result, base, by_file);
        app.render_with(template, &context, mode, TargetProperties::detect())?
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exmetricslib::{Aggregation, MeasureSink};
    use std::path::PathBuf;

    fn sample_result() -> CountResult {
        let mut result = CountResult::new("/project", Aggregation::ByFile);
        result.publish(
            Path::new("/project/lib/a.ex"),
            &ScanResult {
                line_count: 10,
                empty_line_count: 2,
                comment_line_count: 3,
                class_count: 1,
                public_function_count: 2,
                documented_public_function_count: 1,
                ..Default::default()
            },
        );
        result.publish(
            Path::new("/project/lib/b.ex"),
            &ScanResult {
                line_count: 4,
                private_function_count: 1,
                ..Default::default()
            },
        );
        result.skipped.push(PathBuf::from("/project/lib/bad.ex"));
        result
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("lib/app.ex", 20), "lib/app.ex");
        assert_eq!(truncate_name("lib/deeply/nested/app.ex", 10), "..d/app.ex");
    }

    #[test]
    fn test_make_relative() {
        let base = Path::new("/project");
        assert_eq!(make_relative(Path::new("/project/lib/a.ex"), base), "lib/a.ex");
        assert_eq!(make_relative(Path::new("/other/b.ex"), base), "/other/b.ex");
    }

    #[test]
    fn test_output_mode() {
        assert!(matches!(output_mode("json"), Representation::Json));
        assert!(matches!(output_mode("table"), Representation::Human));
    }

    #[test]
    fn test_row_cells_follow_metric_order() {
        let m = ScanResult {
            line_count: 3,
            public_function_count: 3,
            documented_public_function_count: 1,
            ..Default::default()
        }
        .measures();
        let row = to_template_row("x.ex", &m, 20);

        assert_eq!(row.name.len(), 20);
        assert!(row.name.starts_with("x.ex"));
        assert_eq!(row.cells.len(), Metric::ALL.len());
        assert_eq!(row.cells[0].trim(), "3");
        assert_eq!(row.cells[5].trim(), "3");
        assert_eq!(row.cells[6].trim(), "2");
        assert_eq!(row.cells[7].trim(), "33.33");
    }

    #[test]
    fn test_table_context_headers() {
        let context = table_context(&sample_result(), Path::new("/project"), true);

        assert!(context.name_header.starts_with("File"));
        let headers: Vec<_> = context.columns.iter().map(|c| c.trim()).collect();
        assert_eq!(headers[1], "NCLOC");
        assert_eq!(headers[7], "Doc %");
        assert_eq!(context.rows.len(), 2);
        assert!(context.rows[0].name.starts_with("lib/a.ex"));
        assert!(context.total.name.starts_with("Total (2 files)"));
    }

    #[test]
    fn test_render_table() {
        let result = sample_result();
        let output =
            render_count(&result, Path::new("/project"), true, Representation::Human).unwrap();

        assert!(output.contains("NCLOC"));
        assert!(output.contains("lib/a.ex"));
        assert!(output.contains("lib/b.ex"));
        assert!(output.contains("Total (2 files)"));
        assert!(output.ends_with('\n'));

        let totals_only =
            render_count(&result, Path::new("/project"), false, Representation::Human).unwrap();
        assert!(!totals_only.contains("lib/a.ex"));
        assert!(totals_only.contains("Total (2 files)"));
    }

    #[test]
    fn test_render_json() {
        let result = sample_result();
        let output =
            render_count(&result, Path::new("/project"), true, Representation::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["file_count"], 2);
        assert_eq!(parsed["files"][0]["path"], "lib/a.ex");
        assert_eq!(parsed["measures"]["ncloc"], 9);
        assert_eq!(parsed["skipped"][0], "lib/bad.ex");
    }
}
