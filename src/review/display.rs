//! Console rendering for a parsed structured review.
//!
//! Files are rendered in array order with priority-colored issue tags
//! (high=red, medium=yellow, low=green, anything else uncolored). The
//! summary block at the end prints the counts exactly as the model
//! reported them; a disagreement with a recount only earns a stderr
//! warning, never an edit.

use super::{Issue, Priority, ReviewDocument};

// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const SEPARATOR_WIDTH: usize = 66;

/// Print the review to stdout, warning on stderr if the reported summary
/// disagrees with a recount of the files.
pub fn print_review(doc: &ReviewDocument) {
    let recounted = doc.review.recount();
    if doc.review.summary.mismatch(&recounted) {
        eprintln!(
            "warning: reported summary ({} issues) disagrees with file contents ({} issues)",
            doc.review.summary.total_issues, recounted.total_issues
        );
    }
    print!("{}", format_review(doc));
}

/// Render the review to a string. Separated from [`print_review`] so the
/// layout is testable without capturing stdout.
pub fn format_review(doc: &ReviewDocument) -> String {
    let separator = "\u{2500}".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{BOLD}Code Review{RESET}\n"));
    out.push_str(&separator);
    out.push('\n');

    for file in &doc.review.files {
        out.push_str(&format!("\n{BOLD}{}{RESET}\n", file.file_path));
        if file.issues.is_empty() {
            out.push_str("  No issues found.\n");
            continue;
        }
        for issue in &file.issues {
            format_issue(&mut out, issue, &file.file_path);
        }
    }

    let s = &doc.review.summary;
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format!("{BOLD}Summary{RESET}\n"));
    out.push_str(&format!(" Total issues:  {}\n", s.total_issues));
    out.push_str(&format!(
        " High: {}   Medium: {}   Low: {}\n",
        s.high_priority_issues, s.medium_priority_issues, s.low_priority_issues
    ));

    out
}

fn format_issue(out: &mut String, issue: &Issue, file_path: &str) {
    out.push_str(&format!(
        "\n  {} {}\n",
        priority_tag(issue.priority),
        issue.description
    ));
    if !issue.id.is_empty() {
        out.push_str(&format!("  Id:       {}\n", issue.id));
    }
    out.push_str(&format!(
        "  Location: {}:{}-{}\n",
        file_path, issue.location.start_line, issue.location.end_line
    ));
    if !issue.current_code.is_empty() {
        out.push_str("  Current:\n");
        push_code(out, &issue.current_code);
    }
    if !issue.suggested_code.is_empty() {
        out.push_str("  Suggested:\n");
        push_code(out, &issue.suggested_code);
    }
    if let Some(explanation) = &issue.explanation {
        out.push_str(&format!("  Why: {explanation}\n"));
    }
}

/// Colored `[PRIORITY]` tag. Unknown priorities render without color.
fn priority_tag(priority: Priority) -> String {
    match priority {
        Priority::High => format!("{RED}[HIGH]{RESET}"),
        Priority::Medium => format!("{YELLOW}[MEDIUM]{RESET}"),
        Priority::Low => format!("{GREEN}[LOW]{RESET}"),
        Priority::Unknown => "[UNKNOWN]".to_string(),
    }
}

fn push_code(out: &mut String, code: &str) {
    for line in code.lines() {
        out.push_str(&format!("    | {line}\n"));
    }
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
