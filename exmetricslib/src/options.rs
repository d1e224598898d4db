//! Input options for counting.
//!
//! These types control which per-file data a count returns and how it is
//! ordered.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::stats::FileMeasures;

/// Aggregation level for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// Only return totals
    #[default]
    Total,
    /// Include per-file breakdown
    ByFile,
}

/// Field to order per-file results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by path (lexicographical)
    #[default]
    Path,
    /// Order by total line count
    Lines,
    /// Order by non-comment lines of code
    Ncloc,
    /// Order by comment line count
    Comments,
    /// Order by function count
    Functions,
    /// Order by undocumented public API count
    Undocumented,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" | "name" | "file" => Ok(OrderBy::Path),
            "lines" => Ok(OrderBy::Lines),
            "ncloc" | "code" => Ok(OrderBy::Ncloc),
            "comments" | "comment" => Ok(OrderBy::Comments),
            "functions" | "function" => Ok(OrderBy::Functions),
            "undocumented" | "undoc" => Ok(OrderBy::Undocumented),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

/// Ordering configuration for per-file results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Order by path ascending (default)
    pub fn by_path() -> Self {
        Self::default()
    }

    /// Order by a numeric field, largest first
    pub fn by(field: OrderBy) -> Self {
        let direction = match field {
            OrderBy::Path => OrderDirection::Ascending,
            _ => OrderDirection::Descending,
        };
        Self {
            by: field,
            direction,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }

    /// Sort file rows in place.
    ///
    /// The direction applies to the ordering field only; ties on a numeric
    /// field are always broken by ascending path.
    pub fn sort(&self, files: &mut [FileMeasures]) {
        let descending = self.direction == OrderDirection::Descending;
        files.sort_by(|a, b| {
            let primary = match self.by {
                OrderBy::Path => a.path.cmp(&b.path),
                field => sort_key(a, field).cmp(&sort_key(b, field)),
            };
            let primary = if descending { primary.reverse() } else { primary };
            primary.then_with(|| a.path.cmp(&b.path))
        });
    }
}

fn sort_key(file: &FileMeasures, field: OrderBy) -> u64 {
    let m = file.measures();
    match field {
        OrderBy::Path => 0,
        OrderBy::Lines => m.lines,
        OrderBy::Ncloc => m.ncloc,
        OrderBy::Comments => m.comment_lines,
        OrderBy::Functions => m.functions,
        OrderBy::Undocumented => m.public_undocumented_api,
    }
}
