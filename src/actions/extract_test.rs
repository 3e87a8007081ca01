use std::path::Path;

use super::*;

const ROOT: &str = "/project";

fn review_text() -> String {
    format!(
        "# Code Review\n\n\
{HIGH_HEADING}\n\n\
**Issue**: SQL built by string concatenation\n\
**File**: `src/db.ts`\n\
**Location**: lines 10-14\n\n\
```typescript\nconst q = \"SELECT * FROM t WHERE id = \" + id;\n```\n\n\
```typescript\nconst q = sql`SELECT * FROM t WHERE id = ${{id}}`;\n```\n\n\
{MEDIUM_HEADING}\n\n\
**Issue**: Magic number for retry count\n\
**File**: src/retry.ts\n\n\
```ts\nconst MAX_RETRIES = 5;\n```\n\n\
{LOW_HEADING}\n\n\
**Issue**: Typo in comment\n\
**File**: src/util.ts (line 3)\n\n\
---\n\nThat is all.\n"
    )
}

#[test]
fn extracts_single_issue_with_code_pair() {
    let text = format!(
        "{HIGH_HEADING}\n\n**Issue**: desc\n**File**: src/x.ts\n```\nold\n```\n```\nnew\n```\n\n---\n"
    );
    let suggestions = extract_fix_suggestions(&text, Path::new(ROOT), None);
    assert_eq!(suggestions.len(), 1);
    let s = &suggestions[0];
    assert_eq!(s.description, "desc");
    assert_eq!(s.file, Path::new(ROOT).join("src/x.ts"));
    assert_eq!(s.current_code.as_deref(), Some("old"));
    assert_eq!(s.suggested_code.as_deref(), Some("new"));
}

#[test]
fn all_tiers_in_order() {
    let suggestions = extract_fix_suggestions(&review_text(), Path::new(ROOT), None);
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].priority, crate::review::Priority::High);
    assert_eq!(suggestions[1].priority, crate::review::Priority::Medium);
    assert_eq!(suggestions[2].priority, crate::review::Priority::Low);
}

#[test]
fn single_tier_request_scans_only_that_section() {
    let suggestions = extract_fix_suggestions(
        &review_text(),
        Path::new(ROOT),
        Some(crate::review::Priority::Medium),
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].description, "Magic number for retry count");
    assert_eq!(suggestions[0].file, Path::new(ROOT).join("src/retry.ts"));
}

#[test]
fn location_parsed_into_line_range() {
    let suggestions = extract_fix_suggestions(
        &review_text(),
        Path::new(ROOT),
        Some(crate::review::Priority::High),
    );
    assert_eq!(suggestions[0].line_numbers, Some((10, 14)));
}

#[test]
fn single_code_block_is_suggestion_only() {
    let suggestions = extract_fix_suggestions(
        &review_text(),
        Path::new(ROOT),
        Some(crate::review::Priority::Medium),
    );
    let s = &suggestions[0];
    assert!(s.current_code.is_none());
    assert_eq!(s.suggested_code.as_deref(), Some("const MAX_RETRIES = 5;"));
}

#[test]
fn backticks_stripped_from_file_path() {
    let suggestions = extract_fix_suggestions(
        &review_text(),
        Path::new(ROOT),
        Some(crate::review::Priority::High),
    );
    assert_eq!(suggestions[0].file, Path::new(ROOT).join("src/db.ts"));
}

#[test]
fn parenthetical_residue_not_in_path() {
    let suggestions = extract_fix_suggestions(
        &review_text(),
        Path::new(ROOT),
        Some(crate::review::Priority::Low),
    );
    assert_eq!(suggestions[0].file, Path::new(ROOT).join("src/util.ts"));
}

#[test]
fn block_missing_file_is_skipped_without_costing_later_blocks() {
    let text = format!(
        "{HIGH_HEADING}\n\n\
**Issue**: no file reference here\n\n\
**Issue**: second one is fine\n**File**: src/ok.rs\n\n\
---\n"
    );
    let suggestions = extract_fix_suggestions(&text, Path::new(ROOT), None);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].description, "second one is fine");
}

#[test]
fn missing_heading_yields_empty_list_not_error() {
    let text = "No sections at all, just prose.";
    assert!(extract_fix_suggestions(text, Path::new(ROOT), None).is_empty());
}

#[test]
fn sentinel_terminates_last_section() {
    let text = format!(
        "{LOW_HEADING}\n\n**Issue**: in section\n**File**: src/a.ts\n\n---\n\n\
**Issue**: after sentinel\n**File**: src/b.ts\n"
    );
    let suggestions = extract_fix_suggestions(&text, Path::new(ROOT), None);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].file, Path::new(ROOT).join("src/a.ts"));
}

#[test]
fn heuristic_fallback_path_with_slash() {
    let text = format!(
        "{HIGH_HEADING}\n\n**Issue**: odd extension\n**File**: in module src/core/engine.zig somewhere\n\n---\n"
    );
    let suggestions = extract_fix_suggestions(&text, Path::new(ROOT), None);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].file,
        Path::new(ROOT).join("src/core/engine.zig")
    );
}

#[test]
fn line_range_single_number() {
    assert_eq!(parse_line_range("line 7"), Some((7, 7)));
    assert_eq!(parse_line_range("lines 3-9"), Some((3, 9)));
    assert_eq!(parse_line_range("lines 9-3"), None);
    assert_eq!(parse_line_range("nothing here"), None);
}
