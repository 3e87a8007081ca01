//! Review pipeline: discover files, build the prompt, pace the request,
//! call the provider, and hand back sanitized response text.

pub mod client;
mod limiter;
pub mod prompt;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use client::Provider;
use limiter::RateLimiter;

use crate::sanitize::sanitize;
use crate::walk;

/// Rough chars-per-token for the cost estimate printed before sending.
const CHARS_PER_TOKEN: usize = 4;
/// Crude order-of-magnitude input price, dollars per million tokens.
const DOLLARS_PER_MTOK: f64 = 3.0;

/// Everything `crit review` needs to run the request side.
pub struct RequestOptions {
    pub provider: Provider,
    pub model: Option<String>,
    pub include_tests: bool,
    /// Max requests per 60-second window.
    pub max_requests_per_minute: usize,
    /// Write the raw (sanitized) response next to the project.
    pub save: bool,
}

/// Run a review request for the project at `path`. Returns the sanitized
/// raw response text; parsing and display are the caller's business.
pub fn run_review(path: &Path, opts: &RequestOptions) -> Result<String, Box<dyn Error>> {
    let api_key = api_key(opts.provider)?;
    let root = path
        .canonicalize()
        .map_err(|e| format!("Cannot resolve path '{}': {e}", path.display()))?;

    let paths = walk::discover(&root, opts.include_tests);
    if paths.is_empty() {
        return Err(format!("No reviewable source files under {}", root.display()).into());
    }

    let mut files: Vec<(PathBuf, String)> = Vec::with_capacity(paths.len());
    for p in paths {
        match fs::read_to_string(&p) {
            Ok(content) => files.push((p, content)),
            Err(err) => eprintln!("warning: cannot read {}: {err}", p.display()),
        }
    }

    let system = prompt::system_prompt();
    let user = prompt::build_user_prompt(&root, &files);

    let tokens = estimate_tokens(&system) + estimate_tokens(&user);
    eprintln!(
        "Sending {} file(s), ~{} tokens (~${:.4}) to {}...",
        files.len(),
        tokens,
        tokens as f64 / 1_000_000.0 * DOLLARS_PER_MTOK,
        opts.provider.as_str()
    );

    let model = opts
        .model
        .as_deref()
        .unwrap_or_else(|| opts.provider.default_model());

    let mut limiter = RateLimiter::new(opts.max_requests_per_minute);
    limiter.acquire();

    let raw = client::send_message(opts.provider, &api_key, model, &system, &user)?;
    let clean = sanitize(&raw);

    if opts.save {
        let name = format!("review-{}.md", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        fs::write(&name, &clean)?;
        eprintln!("Raw response saved to {name}");
    }

    Ok(clean)
}

/// Provider health check: tiny prompt, any text back counts as healthy.
pub fn ping(provider: Provider, model: Option<&str>) -> Result<(), Box<dyn Error>> {
    let api_key = api_key(provider)?;
    let model = model.unwrap_or_else(|| provider.default_model());
    let reply = client::send_message(provider, &api_key, model, "You are a health check.", prompt::PING_PROMPT)?;
    println!("{}: ok ({} chars)", provider.as_str(), reply.len());
    Ok(())
}

fn api_key(provider: Provider) -> Result<String, Box<dyn Error>> {
    let var = provider.api_key_env();
    std::env::var(var).map_err(|_| format!("{var} environment variable not set").into())
}

/// Chars/4 heuristic; close enough for a pre-flight estimate.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
