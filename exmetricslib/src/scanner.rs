//! Line scanner for Elixir source files.
//!
//! This module holds the classification logic: a single forward pass over
//! the lines of one file that tallies blank lines, comment and documentation
//! lines, module and function definitions, and how many of those carry
//! documentation.
//!
//! The scanner matches surface syntax only. Each line is tested against a
//! small set of precompiled patterns:
//!
//! - **Blank**: empty or whitespace-only
//! - **Doc annotation**: `@doc`, `@moduledoc`, `@typedoc` followed by a quote
//!   or whitespace
//! - **Heredoc**: a line ending in `"""` opens a block that runs until a
//!   line holding only `"""`
//! - **Definition**: `def`, `defp`, `defmodule`, `defstruct`
//! - **Line comment**: `#` as the first non-blank character
//!
//! Three pieces of state carry across lines: whether a `@doc` is waiting for
//! the next definition, whether a `defmodule` has been seen (sticky for the
//! rest of the file), and the counters themselves.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExmetricsError;
use crate::stats::ScanResult;
use crate::Result;

/// Precompiled line matchers, shared by every scanner.
struct Patterns {
    doc: Regex,
    heredoc_open: Regex,
    heredoc_close: Regex,
    definition: Regex,
    line_comment: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        doc: Regex::new(r#"^\s*@(doc|moduledoc|typedoc)(["\s].*)$"#).expect("doc pattern"),
        heredoc_open: Regex::new(r#""""\s*$"#).expect("heredoc pattern"),
        heredoc_close: Regex::new(r#"^\s*"""\s*$"#).expect("heredoc close pattern"),
        definition: Regex::new(r"^\s*def(p|module|struct)?\s").expect("definition pattern"),
        line_comment: Regex::new(r"^\s*#").expect("comment pattern"),
    })
}

/// Kind of documentation annotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DocKind {
    Function,
    Module,
    Type,
}

impl DocKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "doc" => Some(Self::Function),
            "moduledoc" => Some(Self::Module),
            "typedoc" => Some(Self::Type),
            _ => None,
        }
    }
}

/// Kind of `def*` line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Definition {
    Module,
    Struct,
    PublicFunction,
    PrivateFunction,
}

impl Definition {
    fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None => Some(Self::PublicFunction),
            Some("p") => Some(Self::PrivateFunction),
            Some("module") => Some(Self::Module),
            Some("struct") => Some(Self::Struct),
            Some(_) => None,
        }
    }
}

/// Mutable state carried across the lines of one file.
#[derive(Debug, Default, Clone)]
struct ScanState {
    has_pending_doc: bool,
    inside_module: bool,
    result: ScanResult,
}

/// Single-pass scanner producing a [`ScanResult`] for one file.
///
/// A scanner can be reused: [`LineScanner::parse`] starts from a clean state
/// every time, so results never accumulate across files.
#[derive(Debug, Default)]
pub struct LineScanner {
    state: ScanState,
}

impl LineScanner {
    /// Create a scanner with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters and flags.
    pub fn reset(&mut self) {
        self.state = ScanState::default();
    }

    /// Scan the ordered lines of one file (terminators stripped).
    pub fn parse<S: AsRef<str>>(&mut self, lines: &[S]) -> ScanResult {
        self.reset();
        self.state.result.line_count = lines.len() as u64;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i].as_ref();
            self.count_blank(line);
            let in_doc = self.visit_doc(line);

            if patterns().heredoc_open.is_match(line) {
                i = self.skip_heredoc(lines, i, in_doc);
            } else {
                self.visit_definition(line);
                self.visit_line_comment(line);
            }
            i += 1;
        }

        self.state.result
    }

    fn count_blank(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.state.result.empty_line_count += 1;
        }
    }

    /// Returns whether the line is a documentation annotation.
    fn visit_doc(&mut self, line: &str) -> bool {
        let Some(caps) = patterns().doc.captures(line) else {
            return false;
        };
        self.state.result.comment_line_count += 1;

        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        if text.eq_ignore_ascii_case("false") || text.eq_ignore_ascii_case("nil") {
            return true;
        }

        match caps.get(1).and_then(|m| DocKind::from_keyword(m.as_str())) {
            Some(DocKind::Function) => self.state.has_pending_doc = true,
            Some(DocKind::Module) => {
                let result = &mut self.state.result;
                if self.state.inside_module
                    && result.documented_class_count < result.class_count
                {
                    result.documented_class_count += 1;
                }
            }
            Some(DocKind::Type) | None => {}
        }
        true
    }

    /// Consume a heredoc opened on line `start` and return the index of its
    /// closing line (or of the last line when the block is unterminated).
    fn skip_heredoc<S: AsRef<str>>(&mut self, lines: &[S], start: usize, in_doc: bool) -> usize {
        let mut i = start;
        while i + 1 < lines.len() {
            if in_doc {
                self.state.result.comment_line_count += 1;
            }
            i += 1;
            let line = lines[i].as_ref();
            self.count_blank(line);
            if patterns().heredoc_close.is_match(line) {
                break;
            }
        }
        i
    }

    fn visit_definition(&mut self, line: &str) {
        let Some(caps) = patterns().definition.captures(line) else {
            return;
        };
        let result = &mut self.state.result;
        match Definition::from_suffix(caps.get(1).map(|m| m.as_str())) {
            Some(Definition::Module) => {
                result.class_count += 1;
                self.state.inside_module = true;
            }
            Some(Definition::PublicFunction) => {
                result.public_function_count += 1;
                if self.state.has_pending_doc {
                    result.documented_public_function_count += 1;
                }
            }
            Some(Definition::PrivateFunction) => {
                result.private_function_count += 1;
                if self.state.has_pending_doc {
                    result.documented_private_function_count += 1;
                }
            }
            Some(Definition::Struct) | None => {}
        }
        self.state.has_pending_doc = false;
    }

    fn visit_line_comment(&mut self, line: &str) {
        if patterns().line_comment.is_match(line) {
            self.state.result.comment_line_count += 1;
        }
    }
}

/// Scan a list of lines with a fresh scanner.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> ScanResult {
    LineScanner::new().parse(lines)
}

/// Scan source text. LF and CRLF terminators are both accepted and a
/// trailing terminator does not produce an extra line.
pub fn parse_str(text: &str) -> ScanResult {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

/// Read an Elixir file and scan it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ScanResult> {
    let lines = read_lines(path)?;
    Ok(parse_lines(&lines))
}

/// Read a UTF-8 file and split it into lines.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ExmetricsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ExmetricsError::Encoding {
        path: path.to_path_buf(),
    })?;
    Ok(text.lines().map(str::to_owned).collect())
}
