/// CLI argument definitions for the `crit` command.
///
/// Defines all subcommands and their arguments using the `clap` derive
/// macros. Command behavior lives in `main.rs`.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "crit", version, about = "AI code review from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a project's source files for review and display the result
    Review {
        /// Project directory to review (default: current directory)
        path: Option<PathBuf>,

        /// Provider: claude, openai, gemini, or openrouter
        #[arg(short, long, default_value = "claude")]
        provider: String,

        /// Model name (provider default when omitted)
        #[arg(short, long)]
        model: Option<String>,

        /// Include test files and directories (excluded by default)
        #[arg(long)]
        include_tests: bool,

        /// Save the raw response to review-<timestamp>.md for later
        /// `crit parse` / `crit apply` runs
        #[arg(long)]
        save: bool,

        /// Max API requests per minute
        #[arg(long, default_value = "10")]
        rpm: usize,

        /// Emit the parsed review as JSON instead of the colored report
        #[arg(long)]
        json: bool,

        /// Offer extracted fixes for application after the review
        #[arg(long)]
        apply: bool,

        /// Apply high-priority fixes without prompting
        #[arg(long)]
        auto_high: bool,
    },

    /// Parse a saved model response and display the structured review
    Parse {
        /// File holding the raw model response
        file: PathBuf,

        /// Emit the parsed review as JSON instead of the colored report
        #[arg(long)]
        json: bool,
    },

    /// Extract fix suggestions from a saved response and apply them
    Apply {
        /// File holding the raw model response
        file: PathBuf,

        /// Project root to apply fixes in (default: current directory)
        path: Option<PathBuf>,

        /// Only handle this tier: high, medium, or low
        #[arg(long)]
        priority: Option<String>,

        /// Apply high-priority fixes without prompting
        #[arg(long)]
        auto_high: bool,

        /// Skip medium/low fixes instead of prompting for each
        #[arg(long)]
        no_prompt: bool,
    },

    /// Check that a provider is reachable with the current credentials
    Ping {
        /// Provider: claude, openai, gemini, or openrouter
        #[arg(short, long, default_value = "claude")]
        provider: String,

        /// Model name (provider default when omitted)
        #[arg(short, long)]
        model: Option<String>,
    },
}
