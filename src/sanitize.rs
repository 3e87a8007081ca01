//! Sanitizer for raw model output.
//!
//! LLM responses are rendered to the console and saved to disk as markdown,
//! and review text is occasionally pasted into web UIs downstream. Active
//! HTML content has no business in a code review, so it is stripped before
//! anything else sees the text: script/style blocks, embedding tags, inline
//! event handlers, and `javascript:` URLs.

use std::sync::OnceLock;

use regex::Regex;

fn script_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
    })
}

fn embed_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</?(iframe|object|embed|applet|form)\b[^>]*>").unwrap())
}

fn event_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // on<event>=... inside a tag, quoted or bare value
    RE.get_or_init(|| Regex::new(r#"(?i)\son\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap())
}

fn js_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)javascript\s*:").unwrap())
}

/// Strip active HTML content from model output. Pure text-in, text-out;
/// markdown structure (headings, fences, emphasis) is left untouched.
pub fn sanitize(raw: &str) -> String {
    let text = script_block_re().replace_all(raw, "");
    let text = embed_tag_re().replace_all(&text, "");
    let text = event_attr_re().replace_all(&text, "");
    js_url_re().replace_all(&text, "").into_owned()
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
