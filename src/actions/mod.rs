//! Fallback path for reviews that never produced valid JSON: scan the raw
//! markdown for per-priority fix suggestions and apply them to the working
//! tree.
//!
//! Application is strictly sequential: one suggestion at a time, read to
//! write, before the next is considered. Nothing is ever rolled back; the
//! documented mitigation is running in a clean git worktree, and
//! [`dirty_file_count`] exists so callers can warn when that is not the
//! case.

pub mod apply;
pub mod extract;

use std::path::{Path, PathBuf};

use crate::review::Priority;

/// A candidate code change extracted from unstructured review text.
/// Created by [`extract::extract_fix_suggestions`], consumed immediately
/// by the applier, never persisted.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    pub priority: Priority,
    /// Absolute path, resolved against the project root at extraction time.
    pub file: PathBuf,
    pub description: String,
    pub current_code: Option<String>,
    pub suggested_code: Option<String>,
    /// 1-based inclusive line range, when the review stated one.
    pub line_numbers: Option<(usize, usize)>,
}

/// Apply policy. High-priority fixes go in unprompted only when
/// `auto_high` is set; medium/low fixes are offered one by one when
/// `confirm_medium_low` is set and skipped wholesale otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ApplyOptions {
    pub auto_high: bool,
    pub confirm_medium_low: bool,
}

/// Aggregate result of one [`process_review_results`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyCounts {
    pub high_fixed: usize,
    pub medium_fixed: usize,
    pub low_fixed: usize,
    pub total_suggestions: usize,
}

/// Extract and apply fixes for all three priority tiers in turn
/// (high → medium → low). `confirm` is consulted once per medium/low fix;
/// returning `false` skips that one fix and moves on. Every failure inside
/// is logged and counted as a skip; this function itself cannot fail.
pub fn process_review_results(
    raw: &str,
    project_root: &Path,
    opts: &ApplyOptions,
    confirm: &mut dyn FnMut(&FixSuggestion) -> bool,
) -> ApplyCounts {
    let mut counts = ApplyCounts::default();

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let suggestions = extract::extract_fix_suggestions(raw, project_root, Some(priority));
        counts.total_suggestions += suggestions.len();

        for suggestion in &suggestions {
            if apply_with_policy(suggestion, opts, confirm) {
                match priority {
                    Priority::High => counts.high_fixed += 1,
                    Priority::Medium => counts.medium_fixed += 1,
                    Priority::Low => counts.low_fixed += 1,
                    Priority::Unknown => {}
                }
            }
        }
    }

    counts
}

/// Apply one suggestion under the configured policy: high goes in only
/// with `auto_high`, medium/low only past an accepted confirmation.
pub fn apply_with_policy(
    suggestion: &FixSuggestion,
    opts: &ApplyOptions,
    confirm: &mut dyn FnMut(&FixSuggestion) -> bool,
) -> bool {
    match suggestion.priority {
        Priority::High => {
            if !opts.auto_high {
                eprintln!(
                    "skipping high-priority fix for {} (pass --auto-high to apply)",
                    suggestion.file.display()
                );
                return false;
            }
            apply::apply_fix_to_file(suggestion)
        }
        Priority::Medium | Priority::Low => {
            if !opts.confirm_medium_low {
                return false;
            }
            if !confirm(suggestion) {
                eprintln!("skipped by user: {}", suggestion.file.display());
                return false;
            }
            apply::apply_fix_to_file(suggestion)
        }
        Priority::Unknown => false,
    }
}

/// Blocking y/N prompt on stdin showing the proposed change. This is the
/// production `confirm` callback; tests inject their own.
pub fn stdin_confirm(suggestion: &FixSuggestion) -> bool {
    use std::io::{self, Write};

    println!();
    println!(
        "[{}] {}: {}",
        suggestion.priority,
        suggestion.file.display(),
        suggestion.description
    );
    if let Some(current) = &suggestion.current_code {
        println!("  Current:");
        for line in current.lines() {
            println!("    - {line}");
        }
    }
    if let Some(suggested) = &suggestion.suggested_code {
        println!("  Suggested:");
        for line in suggested.lines() {
            println!("    + {line}");
        }
    }
    print!("Apply this fix? [y/N]: ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Number of files with uncommitted changes in the repository containing
/// `root`, or `None` when `root` is not inside a git repository. Used to
/// warn before applying fixes: with no rollback, a clean tree is the only
/// undo path.
pub fn dirty_file_count(root: &Path) -> Option<usize> {
    let repo = git2::Repository::discover(root).ok()?;
    let mut opts = git2::StatusOptions::new();
    opts.include_untracked(false).include_ignored(false);
    let statuses = repo.statuses(Some(&mut opts)).ok()?;
    Some(statuses.iter().filter(|e| !e.status().is_empty()).count())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
