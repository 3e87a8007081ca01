//! Lexical cleanup for near-JSON candidate text.
//!
//! Models asked for JSON frequently emit `//` comments, `/* */` comments,
//! and trailing commas. `serde_json` rejects all three, so candidates get
//! one cleanup pass before the final parse. The scan tracks string and
//! escape state so comment markers and commas inside string literals are
//! never touched.

/// Strip `//` and `/* */` comments and trailing commas from candidate JSON.
pub fn strip_comments_and_commas(text: &str) -> String {
    let without_comments = strip_comments(text);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if ch == '\\' {
                // escape: the next char cannot close the string
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                // line comment: drop up to (not including) the newline
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next(); // consume '*'
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if ch == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == ',' {
            // A comma is trailing when the next non-whitespace char closes
            // a container. Buffer the whitespace so formatting survives.
            let mut pending = String::new();
            let mut closes = false;
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    pending.push(next);
                    chars.next();
                } else {
                    closes = next == '}' || next == ']';
                    break;
                }
            }
            if !closes {
                out.push(',');
            }
            out.push_str(&pending);
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
#[path = "json_clean_test.rs"]
mod tests;
