//! Best-effort extraction of a structured review from raw model output.
//!
//! Even when the prompt demands pure JSON, models wrap it in prose, fence
//! it, comment it, or leave trailing commas. [`parse`] walks an ordered
//! list of extraction strategies from most to least structured and returns
//! the first candidate that survives cleanup and validation. It never
//! panics and never returns an error: any failure is a `None` plus a
//! stderr line.
//!
//! Strategy order: whole-text object → fenced `json` block → untagged
//! fenced block → brace substring containing `"review"` → any brace
//! substring. A fenced block tagged with a recognized programming language
//! aborts the whole chain: code is never fed through the JSON cleanup
//! heuristics, which would mangle it.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::json_clean::strip_comments_and_commas;
use super::{FileReview, Issue, Review, ReviewDocument, Summary};

/// Fence tags that mark a block as source code rather than data. A block
/// tagged with one of these is explicit evidence the model answered with
/// code, not a review object.
const CODE_FENCE_TAGS: &[&str] = &[
    "typescript", "ts", "tsx", "javascript", "js", "jsx", "python", "py", "rust", "rs", "go",
    "java", "kotlin", "c", "cpp", "csharp", "cs", "ruby", "rb", "php", "swift", "scala", "sh",
    "bash", "shell", "sql", "html", "css", "yaml", "yml", "toml", "xml", "diff",
];

/// Outcome of a single extraction strategy.
enum Extraction {
    /// Candidate JSON text to clean up and parse.
    Candidate(String),
    /// Stop the chain entirely (recognized-language code block found).
    Abort,
}

/// Parse raw model output into a structured review. Returns `None` when no
/// strategy yields a valid (or loosely acceptable) review object.
pub fn parse(raw: &str) -> Option<ReviewDocument> {
    let strategies: &[fn(&str) -> Option<Extraction>] = &[
        extract_direct,
        extract_fenced_json,
        extract_fenced_untagged,
        extract_brace_with_review,
        extract_brace_any,
    ];

    for strategy in strategies {
        match strategy(raw) {
            Some(Extraction::Candidate(candidate)) => {
                let cleaned = strip_comments_and_commas(&candidate);
                match serde_json::from_str::<Value>(&cleaned) {
                    Ok(value) => return validate(value),
                    Err(err) => {
                        eprintln!("warning: review candidate did not parse as JSON: {err}");
                        // fall through to the next, less structured strategy
                    }
                }
            }
            Some(Extraction::Abort) => {
                eprintln!(
                    "warning: model response contains a source-code block, not a review object"
                );
                return None;
            }
            None => {}
        }
    }

    eprintln!("warning: no structured review found in model response");
    None
}

/// Strategy 1: the whole (trimmed) response is a JSON object.
fn extract_direct(raw: &str) -> Option<Extraction> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        Some(Extraction::Candidate(trimmed.to_string()))
    } else {
        None
    }
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[ \t]*\n(.*?)```").unwrap())
}

/// Strategy 2: the first fenced block explicitly tagged `json`.
fn extract_fenced_json(raw: &str) -> Option<Extraction> {
    for caps in fence_re().captures_iter(raw) {
        let tag = caps[1].to_ascii_lowercase();
        if tag == "json" || tag == "jsonc" || tag == "json5" {
            return Some(Extraction::Candidate(caps[2].trim().to_string()));
        }
    }
    None
}

/// Strategy 3: the first fenced block of any kind. Untagged blocks become
/// candidates; blocks tagged with a recognized language abort the chain.
fn extract_fenced_untagged(raw: &str) -> Option<Extraction> {
    let caps = fence_re().captures(raw)?;
    let tag = caps[1].to_ascii_lowercase();
    if tag.is_empty() {
        Some(Extraction::Candidate(caps[2].trim().to_string()))
    } else if CODE_FENCE_TAGS.contains(&tag.as_str()) {
        Some(Extraction::Abort)
    } else {
        // unrecognized tag: treat like untagged and let the parse decide
        Some(Extraction::Candidate(caps[2].trim().to_string()))
    }
}

/// Strategy 4: widest brace-delimited substring containing `"review"`.
fn extract_brace_with_review(raw: &str) -> Option<Extraction> {
    let candidate = widest_brace_span(raw)?;
    if candidate.contains("\"review\"") {
        Some(Extraction::Candidate(candidate.to_string()))
    } else {
        None
    }
}

/// Strategy 5: widest brace-delimited substring of any kind.
fn extract_brace_any(raw: &str) -> Option<Extraction> {
    widest_brace_span(raw).map(|s| Extraction::Candidate(s.to_string()))
}

/// Substring from the first `{` to the last `}`, when both exist in order.
fn widest_brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start { Some(&raw[start..=end]) } else { None }
}

/// Validate a parsed JSON value against the review schema. Strict typed
/// deserialization first; a value that fails but still carries a `review`
/// key is accepted loosely, salvaging whatever fields deserialize.
fn validate(value: Value) -> Option<ReviewDocument> {
    match serde_json::from_value::<ReviewDocument>(value.clone()) {
        Ok(doc) => Some(doc),
        Err(err) => {
            if value.get("review").is_some() {
                eprintln!("warning: review schema validation failed ({err}), accepting loosely");
                Some(salvage(&value))
            } else {
                eprintln!("warning: parsed JSON is not a review object: {err}");
                None
            }
        }
    }
}

/// Loose acceptance path: keep every file and issue that deserializes on
/// its own, drop the rest with a warning. When the summary is absent or
/// malformed it is recounted from the salvaged issues; a summary that does
/// deserialize is trusted as reported.
fn salvage(value: &Value) -> ReviewDocument {
    let review = &value["review"];
    let mut files = Vec::new();

    if let Some(raw_files) = review.get("files").and_then(Value::as_array) {
        for raw_file in raw_files {
            let Some(file_path) = raw_file.get("filePath").and_then(Value::as_str) else {
                eprintln!("warning: dropping review file entry without filePath");
                continue;
            };
            let mut issues = Vec::new();
            if let Some(raw_issues) = raw_file.get("issues").and_then(Value::as_array) {
                for raw_issue in raw_issues {
                    match serde_json::from_value::<Issue>(raw_issue.clone()) {
                        Ok(issue) => issues.push(issue),
                        Err(err) => {
                            eprintln!("warning: dropping malformed issue in {file_path}: {err}");
                        }
                    }
                }
            }
            files.push(FileReview {
                file_path: file_path.to_string(),
                issues,
            });
        }
    }

    let mut review = Review {
        files,
        summary: Summary::default(),
    };
    review.summary = match reported_summary(value) {
        Some(summary) => summary,
        None => review.recount(),
    };

    ReviewDocument { review }
}

/// Reported summary from the raw value, when it deserializes cleanly.
/// Trust-the-model: a well-formed reported summary wins over a recount.
fn reported_summary(value: &Value) -> Option<Summary> {
    let raw = value.get("review")?.get("summary")?.clone();
    serde_json::from_value::<Summary>(raw).ok()
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
