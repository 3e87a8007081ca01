//! In-place application of a single fix suggestion.
//!
//! Three matching strategies, tried in order: exact substring replace,
//! whitespace-normalized locate-and-splice, and a stated line-range
//! splice. Replacement is always a whole-file rewrite. Every failure path
//! returns `false` after a stderr line; nothing in here can take down a
//! run, and nothing is ever rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use super::FixSuggestion;

/// Apply one suggestion to its target file. Returns `true` only when the
/// file was actually rewritten.
pub fn apply_fix_to_file(suggestion: &FixSuggestion) -> bool {
    let path = recleaned_path(&suggestion.file);

    if !path.exists() {
        eprintln!("cannot apply fix: file not found: {}", path.display());
        return false;
    }

    let (Some(current), Some(suggested)) =
        (&suggestion.current_code, &suggestion.suggested_code)
    else {
        // no current snippet means no anchor: blind insertion is worse
        // than no fix at all
        eprintln!(
            "cannot apply fix to {}: no current-code anchor for the replacement",
            path.display()
        );
        return false;
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("cannot read {}: {err}", path.display());
            return false;
        }
    };

    let updated = replace_exact(&content, current, suggested)
        .or_else(|| replace_normalized(&content, current, suggested))
        .or_else(|| replace_line_range(&content, suggestion, current, suggested));

    let Some(updated) = updated else {
        eprintln!(
            "cannot apply fix to {}: current code not found (exact, normalized, and line-range matches all failed)",
            path.display()
        );
        return false;
    };

    if let Err(err) = fs::write(&path, updated) {
        eprintln!("cannot write {}: {err}", path.display());
        return false;
    }
    true
}

/// Extraction can leave `(line 3)`-style residue on the path; cut at the
/// first parenthesis or comma.
fn recleaned_path(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    match text.find(['(', ')', ',']) {
        Some(pos) => PathBuf::from(text[..pos].trim_end()),
        None => path.to_path_buf(),
    }
}

/// Strategy 1: exact substring replacement (first occurrence).
fn replace_exact(content: &str, current: &str, suggested: &str) -> Option<String> {
    content
        .contains(current)
        .then(|| content.replacen(current, suggested, 1))
}

/// Strategy 2: whitespace-insensitive match. When the normalized file
/// contains the normalized snippet, the original span is located via the
/// snippet's first line and a span of the snippet's length is spliced out.
fn replace_normalized(content: &str, current: &str, suggested: &str) -> Option<String> {
    if !normalize_ws(content).contains(&normalize_ws(current)) {
        return None;
    }

    let first_line = current.lines().map(str::trim).find(|l| !l.is_empty())?;
    let start = content.find(first_line)?;

    let mut end = (start + current.len()).min(content.len());
    // keep the splice on a char boundary
    while end < content.len() && !content.is_char_boundary(end) {
        end += 1;
    }

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..start]);
    updated.push_str(suggested);
    updated.push_str(&content[end..]);
    Some(updated)
}

/// Strategy 3: splice the stated line range when its content matches the
/// snippet, raw or whitespace-normalized.
fn replace_line_range(
    content: &str,
    suggestion: &FixSuggestion,
    current: &str,
    suggested: &str,
) -> Option<String> {
    let (start, end) = suggestion.line_numbers?;
    let lines: Vec<&str> = content.lines().collect();
    if start < 1 || end > lines.len() {
        return None;
    }

    let span = lines[start - 1..end].join("\n");
    if span != current && normalize_ws(&span) != normalize_ws(current) {
        return None;
    }

    let mut updated: Vec<&str> = Vec::with_capacity(lines.len());
    updated.extend_from_slice(&lines[..start - 1]);
    updated.extend(suggested.lines());
    updated.extend_from_slice(&lines[end..]);

    let mut out = updated.join("\n");
    if content.ends_with('\n') {
        out.push('\n');
    }
    Some(out)
}

/// Collapse every run of whitespace to a single space and trim the ends.
fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
