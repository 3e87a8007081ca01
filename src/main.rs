mod actions;
mod ai;
mod cli;
mod review;
mod sanitize;
mod walk;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use actions::{ApplyCounts, ApplyOptions};
use ai::client::Provider;
use cli::{Cli, Commands};
use review::Priority;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Review {
            path,
            provider,
            model,
            include_tests,
            save,
            rpm,
            json,
            apply,
            auto_high,
        } => review_cmd(
            path, &provider, model, include_tests, save, rpm, json, apply, auto_high,
        ),
        Commands::Parse { file, json } => parse_cmd(&file, json),
        Commands::Apply {
            file,
            path,
            priority,
            auto_high,
            no_prompt,
        } => apply_cmd(&file, path, priority.as_deref(), auto_high, no_prompt),
        Commands::Ping { provider, model } => ping_cmd(&provider, model.as_deref()),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn review_cmd(
    path: Option<PathBuf>,
    provider: &str,
    model: Option<String>,
    include_tests: bool,
    save: bool,
    rpm: usize,
    json: bool,
    apply: bool,
    auto_high: bool,
) -> Result<(), Box<dyn Error>> {
    let provider: Provider = provider.parse()?;
    let target = path.unwrap_or_else(|| PathBuf::from("."));

    let opts = ai::RequestOptions {
        provider,
        model,
        include_tests,
        max_requests_per_minute: rpm,
        save,
    };
    let raw = ai::run_review(&target, &opts)?;

    match review::parser::parse(&raw) {
        Some(doc) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                review::display::print_review(&doc);
            }
        }
        None => {
            eprintln!("No structured review in the response; raw text follows.");
            println!("{raw}");
        }
    }

    if apply || auto_high {
        let root = target.canonicalize()?;
        warn_if_dirty(&root);
        let opts = ApplyOptions {
            auto_high,
            confirm_medium_low: true,
        };
        let counts =
            actions::process_review_results(&raw, &root, &opts, &mut actions::stdin_confirm);
        print_counts(&counts);
    }

    Ok(())
}

fn parse_cmd(file: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let raw = sanitize::sanitize(&fs::read_to_string(file)?);
    let Some(doc) = review::parser::parse(&raw) else {
        return Err(format!("no structured review found in {}", file.display()).into());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        review::display::print_review(&doc);
    }
    Ok(())
}

fn apply_cmd(
    file: &Path,
    path: Option<PathBuf>,
    priority: Option<&str>,
    auto_high: bool,
    no_prompt: bool,
) -> Result<(), Box<dyn Error>> {
    let raw = sanitize::sanitize(&fs::read_to_string(file)?);
    let root = path
        .unwrap_or_else(|| PathBuf::from("."))
        .canonicalize()
        .map_err(|e| format!("Cannot resolve project root: {e}"))?;

    warn_if_dirty(&root);

    let opts = ApplyOptions {
        auto_high,
        confirm_medium_low: !no_prompt,
    };

    let counts = match priority {
        Some(tier) => {
            let tier: Priority = tier.parse()?;
            let suggestions = actions::extract::extract_fix_suggestions(&raw, &root, Some(tier));
            let mut counts = ApplyCounts {
                total_suggestions: suggestions.len(),
                ..Default::default()
            };
            for suggestion in &suggestions {
                if actions::apply_with_policy(suggestion, &opts, &mut actions::stdin_confirm) {
                    match tier {
                        Priority::High => counts.high_fixed += 1,
                        Priority::Medium => counts.medium_fixed += 1,
                        Priority::Low => counts.low_fixed += 1,
                        Priority::Unknown => {}
                    }
                }
            }
            counts
        }
        None => actions::process_review_results(&raw, &root, &opts, &mut actions::stdin_confirm),
    };

    print_counts(&counts);
    Ok(())
}

fn ping_cmd(provider: &str, model: Option<&str>) -> Result<(), Box<dyn Error>> {
    let provider: Provider = provider.parse()?;
    ai::ping(provider, model)
}

/// With no rollback after application, a clean worktree is the only undo
/// path; say so before touching anything.
fn warn_if_dirty(root: &Path) {
    match actions::dirty_file_count(root) {
        Some(0) => {}
        Some(n) => eprintln!(
            "warning: {n} file(s) already modified in this worktree; applied fixes cannot be \
             rolled back, commit or stash first to keep `git checkout` as an undo"
        ),
        None => eprintln!(
            "warning: {} is not in a git repository; applied fixes cannot be undone",
            root.display()
        ),
    }
}

fn print_counts(counts: &ApplyCounts) {
    println!(
        "Applied {} high, {} medium, {} low priority fix(es) of {} suggestion(s)",
        counts.high_fixed, counts.medium_fixed, counts.low_fixed, counts.total_suggestions
    );
}
