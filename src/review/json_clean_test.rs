use super::*;

#[test]
fn clean_json_untouched() {
    let text = r#"{"a": 1, "b": [2, 3]}"#;
    assert_eq!(strip_comments_and_commas(text), text);
}

#[test]
fn strips_line_comment() {
    let text = "{\n  \"a\": 1 // the answer\n}";
    assert_eq!(strip_comments_and_commas(text), "{\n  \"a\": 1 \n}");
}

#[test]
fn strips_block_comment() {
    let text = "{ /* header */ \"a\": 1 }";
    assert_eq!(strip_comments_and_commas(text), "{  \"a\": 1 }");
}

#[test]
fn comment_markers_inside_strings_survive() {
    let text = r#"{"url": "https://example.com", "glob": "src/**/*.rs"}"#;
    assert_eq!(strip_comments_and_commas(text), text);
}

#[test]
fn strips_trailing_comma_in_object() {
    let text = "{\"a\": 1,}";
    assert_eq!(strip_comments_and_commas(text), "{\"a\": 1}");
}

#[test]
fn strips_trailing_comma_in_array_with_whitespace() {
    let text = "[1, 2,\n]";
    assert_eq!(strip_comments_and_commas(text), "[1, 2\n]");
}

#[test]
fn keeps_separating_commas() {
    let text = "[1, 2, 3]";
    assert_eq!(strip_comments_and_commas(text), text);
}

#[test]
fn comma_inside_string_survives() {
    let text = r#"{"msg": "a, b,"}"#;
    assert_eq!(strip_comments_and_commas(text), text);
}

#[test]
fn escaped_quote_does_not_end_string() {
    let text = r#"{"msg": "say \"hi\", // not a comment"}"#;
    assert_eq!(strip_comments_and_commas(text), text);
}

#[test]
fn combined_cleanup_parses() {
    let text = r#"{
  // reported issues
  "review": {
    "files": [],
    "summary": {
      "totalIssues": 0, /* none */
    },
  }
}"#;
    let cleaned = strip_comments_and_commas(text);
    let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
    assert!(value.get("review").is_some());
}
