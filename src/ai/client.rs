//! Thin blocking HTTP clients for the supported chat providers.
//!
//! One request, one response: the review flow never needs a tool loop or
//! streaming. Request bodies are built with `serde_json::json!` per
//! provider dialect, responses are picked apart as `Value`; the only
//! field anyone needs back is the text.

use std::error::Error;
use std::str::FromStr;
use std::time::Duration;

use serde_json::{Value, json};

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const GEMINI_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_TOKENS: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Claude,
    Openai,
    Gemini,
    Openrouter,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::Openai => "openai",
            Provider::Gemini => "gemini",
            Provider::Openrouter => "openrouter",
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Claude => "ANTHROPIC_API_KEY",
            Provider::Openai => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Openrouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Claude => "claude-sonnet-4-5-20250929",
            Provider::Openai => "gpt-4o",
            Provider::Gemini => "gemini-2.0-flash",
            Provider::Openrouter => "anthropic/claude-sonnet-4.5",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Provider::Claude),
            "openai" | "gpt" => Ok(Provider::Openai),
            "gemini" | "google" => Ok(Provider::Gemini),
            "openrouter" => Ok(Provider::Openrouter),
            other => Err(format!(
                "Unsupported provider: {other}. Supported: claude, openai, gemini, openrouter"
            )),
        }
    }
}

/// Send one system+user exchange and return the response text.
pub fn send_message(
    provider: Provider,
    api_key: &str,
    model: &str,
    system: &str,
    user: &str,
) -> Result<String, Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let request = match provider {
        Provider::Claude => client
            .post(ANTHROPIC_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "system": system,
                "messages": [{"role": "user", "content": user}],
            })),
        Provider::Openai | Provider::Openrouter => {
            let url = if provider == Provider::Openai {
                OPENAI_URL
            } else {
                OPENROUTER_URL
            };
            client.post(url).bearer_auth(api_key).json(&json!({
                "model": model,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": user},
                ],
            }))
        }
        Provider::Gemini => client
            .post(format!("{GEMINI_URL_BASE}/{model}:generateContent"))
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "system_instruction": {"parts": [{"text": system}]},
                "contents": [{"parts": [{"text": user}]}],
            })),
    };

    let resp = request.send()?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(format!("{} API error ({status}): {body}", provider.as_str()).into());
    }

    let body: Value = resp.json()?;
    extract_text(provider, &body)
        .ok_or_else(|| format!("{} response contained no text", provider.as_str()).into())
}

/// Pull the response text out of a provider-shaped body.
fn extract_text(provider: Provider, body: &Value) -> Option<String> {
    let text = match provider {
        Provider::Claude => {
            let blocks = body.get("content")?.as_array()?;
            blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        }
        Provider::Openai | Provider::Openrouter => body
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()?
            .to_string(),
        Provider::Gemini => {
            let parts = body
                .get("candidates")?
                .get(0)?
                .get("content")?
                .get("parts")?
                .as_array()?;
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        }
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
