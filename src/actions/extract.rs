//! Fix-suggestion extraction from unstructured review markdown.
//!
//! The prompt asks for three priority sections under fixed headings, each
//! issue introduced by `**Issue**:` with a `**File**:` reference, an
//! optional `**Location**:` line, and up to two fenced code blocks
//! (current, then suggested). The same heading constants feed the prompt
//! builder, so the anchors here and the format the model is asked for
//! cannot drift apart. Anything that does not match is skipped, never
//! fatal: one malformed issue must not cost the rest of the section.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::FixSuggestion;
use crate::review::Priority;

/// Section headings the model is instructed to emit, and the sentinel that
/// closes the last section. A response that deviates yields an empty list
/// for the affected tier rather than an error.
pub const HIGH_HEADING: &str = "## High Priority";
pub const MEDIUM_HEADING: &str = "## Medium Priority";
pub const LOW_HEADING: &str = "## Low Priority";
pub const SECTION_SENTINEL: &str = "\n---";

const ISSUE_MARKER: &str = "**Issue**:";
const FILE_MARKER: &str = "**File**:";
const LOCATION_MARKER: &str = "**Location**:";

fn source_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"([A-Za-z0-9_\-./\\]+\.(?:tsx?|jsx?|mjs|cjs|py|rs|go|java|kt|rb|php|swift|scala|cs|c|h|cc|cpp|hpp|sh|sql|vue|svelte))\b",
        )
        .unwrap()
    })
}

fn lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)lines?\s+(\d+)(?:\s*-\s*(\d+))?").unwrap())
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\n(.*?)```").unwrap())
}

/// Extract fix suggestions from raw review markdown. With a specific
/// `priority`, only that section is scanned; otherwise all three are
/// scanned and concatenated high → medium → low.
pub fn extract_fix_suggestions(
    raw: &str,
    project_root: &Path,
    priority: Option<Priority>,
) -> Vec<FixSuggestion> {
    let tiers: &[Priority] = match priority {
        Some(p) => match p {
            Priority::High => &[Priority::High],
            Priority::Medium => &[Priority::Medium],
            Priority::Low => &[Priority::Low],
            Priority::Unknown => return Vec::new(),
        },
        None => &[Priority::High, Priority::Medium, Priority::Low],
    };

    let mut suggestions = Vec::new();
    for &tier in tiers {
        if let Some(section) = priority_section(raw, tier) {
            parse_section(section, tier, project_root, &mut suggestions);
        }
    }
    suggestions
}

/// Slice out one priority section: from its heading to the next heading,
/// the `---` sentinel, or end of text, whichever comes first.
fn priority_section(raw: &str, priority: Priority) -> Option<&str> {
    let heading = match priority {
        Priority::High => HIGH_HEADING,
        Priority::Medium => MEDIUM_HEADING,
        Priority::Low => LOW_HEADING,
        Priority::Unknown => return None,
    };

    let start = raw.find(heading)? + heading.len();
    let rest = &raw[start..];

    let mut end = rest.len();
    for marker in [HIGH_HEADING, MEDIUM_HEADING, LOW_HEADING, SECTION_SENTINEL] {
        if marker == heading {
            continue;
        }
        if let Some(pos) = rest.find(marker) {
            end = end.min(pos);
        }
    }
    Some(&rest[..end])
}

/// Parse one section's issue blocks into `out`. Blocks missing either the
/// issue description or the file reference are skipped silently.
fn parse_section(section: &str, priority: Priority, project_root: &Path, out: &mut Vec<FixSuggestion>) {
    // split on the issue marker; the first chunk is pre-amble, not an issue
    for block in section.split(ISSUE_MARKER).skip(1) {
        match parse_issue_block(block, priority, project_root) {
            Some(suggestion) => out.push(suggestion),
            None => {
                eprintln!("warning: skipping malformed {priority}-priority issue block");
            }
        }
    }
}

fn parse_issue_block(block: &str, priority: Priority, project_root: &Path) -> Option<FixSuggestion> {
    let description = block.lines().next()?.trim().to_string();
    if description.is_empty() {
        return None;
    }

    let file_line = marker_line(block, FILE_MARKER)?;
    let file_token = resolve_file_token(&file_line)?;
    let file = project_root.join(file_token.trim_start_matches("./"));

    let line_numbers = marker_line(block, LOCATION_MARKER)
        .as_deref()
        .and_then(parse_line_range);

    let mut code_blocks: Vec<String> = fence_re()
        .captures_iter(block)
        .map(|caps| caps[1].trim_end().to_string())
        .collect();

    let (current_code, suggested_code) = match code_blocks.len() {
        0 => (None, None),
        // a single block is the suggestion; with no "before" snippet there
        // is nothing to diff against
        1 => (None, Some(code_blocks.remove(0))),
        _ => {
            let suggested = code_blocks.swap_remove(1);
            let current = code_blocks.swap_remove(0);
            (Some(current), Some(suggested))
        }
    };

    Some(FixSuggestion {
        priority,
        file,
        description,
        current_code,
        suggested_code,
        line_numbers,
    })
}

/// Text after `marker` up to the end of its line, trimmed.
fn marker_line(block: &str, marker: &str) -> Option<String> {
    let start = block.find(marker)? + marker.len();
    let rest = &block[start..];
    let line = rest.lines().next().unwrap_or("");
    Some(line.trim().to_string())
}

/// Clean a `**File**:` value down to a usable relative path. Markdown
/// formatting is stripped first; then a recognized-source-extension match,
/// falling back to the first token that looks path-shaped.
fn resolve_file_token(file_line: &str) -> Option<String> {
    let cleaned = file_line.replace(['`', '*'], "");
    let cleaned = cleaned.trim();

    if let Some(caps) = source_path_re().captures(cleaned) {
        return Some(caps[1].to_string());
    }

    // heuristic fallback: first separator-delimited token that carries a
    // slash or a known script extension
    cleaned
        .split([' ', '\t', ',', '(', ')'])
        .find(|token| !token.is_empty() && (token.contains('/') || token.contains(".ts") || token.contains(".js")))
        .map(|token| token.to_string())
}

/// Parse `lines N` or `lines N-M` into a 1-based inclusive range.
fn parse_line_range(location_line: &str) -> Option<(usize, usize)> {
    let caps = lines_re().captures(location_line)?;
    let start: usize = caps[1].parse().ok()?;
    let end: usize = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => start,
    };
    (start >= 1 && end >= start).then_some((start, end))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
