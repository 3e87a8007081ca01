//! Structured review model and its parser/formatter.
//!
//! A *structured review* is the JSON shape the provider is asked to emit:
//! files, each with a list of issues, plus a summary with per-priority
//! counts. Models do not reliably honor the shape, so [`parser::parse`]
//! degrades through a chain of extraction strategies, and the types here
//! deserialize leniently (unknown priorities survive as
//! [`Priority::Unknown`], missing optional fields default).

pub mod display;
mod json_clean;
pub mod parser;

use serde::{Deserialize, Serialize};

/// Issue priority tier. Governs display color and apply policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Anything the model invents that is not one of the three tiers.
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    /// CLI-facing parse: unlike deserialization, an unrecognized tier is
    /// an error here, not `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("Unknown priority: {other}. Expected high, medium, or low")),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level wrapper: the provider is asked to nest everything under `review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDocument {
    pub review: Review,
}

/// A parsed structured review: per-file issues plus reported totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub files: Vec<FileReview>,
    #[serde(default)]
    pub summary: Summary,
}

/// Issues found in a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReview {
    pub file_path: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// One issue reported by the model. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default)]
    pub id: String,
    pub priority: Priority,
    pub description: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub current_code: String,
    #[serde(default)]
    pub suggested_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Line range of an issue within its file (1-based, inclusive).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: u32,
    pub end_line: u32,
}

/// Per-priority issue counts as *reported by the model*. Displayed verbatim;
/// see [`Summary::mismatch`] for the consistency check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: u32,
    pub high_priority_issues: u32,
    pub medium_priority_issues: u32,
    pub low_priority_issues: u32,
}

impl Review {
    /// Count issues per tier across all files, independent of the summary.
    pub fn recount(&self) -> Summary {
        let mut s = Summary::default();
        for file in &self.files {
            for issue in &file.issues {
                s.total_issues += 1;
                match issue.priority {
                    Priority::High => s.high_priority_issues += 1,
                    Priority::Medium => s.medium_priority_issues += 1,
                    Priority::Low => s.low_priority_issues += 1,
                    Priority::Unknown => {}
                }
            }
        }
        s
    }
}

impl Summary {
    /// True when the reported totals disagree with a recount of the files.
    /// The reported summary still wins for display; this only decides
    /// whether a warning is worth printing.
    pub fn mismatch(&self, recounted: &Summary) -> bool {
        self.total_issues != recounted.total_issues
            || self.high_priority_issues != recounted.high_priority_issues
            || self.medium_priority_issues != recounted.medium_priority_issues
            || self.low_priority_issues != recounted.low_priority_issues
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
