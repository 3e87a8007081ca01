//! Prompt assembly for the review request.
//!
//! The system prompt asks for the structured JSON schema first and, when
//! the model cannot comply, the fixed-heading markdown fallback. The
//! heading constants come from the extraction module so the format asked
//! for and the format parsed are the same strings.

use std::path::Path;

use crate::actions::extract::{HIGH_HEADING, LOW_HEADING, MEDIUM_HEADING};

const SYSTEM_PROMPT_HEAD: &str = "\
You are an expert code reviewer. Review the provided source files for bugs, \
security problems, performance issues, and maintainability concerns.

Respond with a single JSON object, no prose before or after, matching:

{
  \"review\": {
    \"files\": [
      {
        \"filePath\": \"relative/path.ext\",
        \"issues\": [
          {
            \"id\": \"SHORT-ID\",
            \"priority\": \"high\" | \"medium\" | \"low\",
            \"description\": \"one-line problem statement\",
            \"location\": { \"startLine\": 1, \"endLine\": 2 },
            \"currentCode\": \"the code as it is\",
            \"suggestedCode\": \"the code as it should be\",
            \"explanation\": \"why this matters (optional)\"
          }
        ]
      }
    ],
    \"summary\": {
      \"totalIssues\": 0,
      \"highPriorityIssues\": 0,
      \"mediumPriorityIssues\": 0,
      \"lowPriorityIssues\": 0
    }
  }
}

Include every reviewed file in `files`, with an empty `issues` array when a \
file is clean. `summary` counts must cover all files.";

/// System prompt sent with every review request.
pub fn system_prompt() -> String {
    format!(
        "{SYSTEM_PROMPT_HEAD}\n\n\
If you cannot produce valid JSON, fall back to markdown with exactly these \
section headings, in this order, ending with a `---` line:\n\n\
{HIGH_HEADING}\n{MEDIUM_HEADING}\n{LOW_HEADING}\n\n\
Under each heading list issues as:\n\n\
**Issue**: one-line description\n\
**File**: relative/path.ext\n\
**Location**: lines N-M\n\n\
followed by two fenced code blocks: the current code, then the suggested \
replacement."
    )
}

/// Tiny prompt used by `crit ping` to verify a provider is reachable.
pub const PING_PROMPT: &str = "Reply with the single word: pong";

/// Concatenate the files under review into the user prompt, each prefixed
/// with its path so issue reports can reference it.
pub fn build_user_prompt(root: &Path, files: &[(std::path::PathBuf, String)]) -> String {
    let mut prompt = format!(
        "Review the following {} file(s) from `{}`:\n",
        files.len(),
        root.display()
    );
    for (path, content) in files {
        let rel = path.strip_prefix(root).unwrap_or(path);
        prompt.push_str(&format!("\n### File: {}\n\n```\n{content}", rel.display()));
        if !content.ends_with('\n') {
            // keep the closing fence on its own line
            prompt.push('\n');
        }
        prompt.push_str("```\n");
    }
    prompt
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
