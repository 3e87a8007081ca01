use super::*;

#[test]
fn plain_markdown_untouched() {
    let text = "# Review\n\nSome **bold** text and a `code span`.\n\n```rust\nfn main() {}\n```\n";
    assert_eq!(sanitize(text), text);
}

#[test]
fn strips_script_block() {
    let text = "before <script>alert('x')</script> after";
    assert_eq!(sanitize(text), "before  after");
}

#[test]
fn strips_script_block_with_attrs_and_case() {
    let text = "a<SCRIPT type=\"text/javascript\">\nvar x = 1;\n</SCRIPT>b";
    assert_eq!(sanitize(text), "ab");
}

#[test]
fn strips_style_block() {
    let text = "x<style>body { color: red }</style>y";
    assert_eq!(sanitize(text), "xy");
}

#[test]
fn strips_iframe_tags_but_keeps_inner_text() {
    let text = "<iframe src=\"http://evil\">caption</iframe>";
    assert_eq!(sanitize(text), "caption");
}

#[test]
fn strips_event_handlers() {
    let text = "<img src=\"x.png\" onerror=\"steal()\">";
    assert_eq!(sanitize(text), "<img src=\"x.png\">");
}

#[test]
fn strips_javascript_urls() {
    let text = "[click](javascript:alert(1))";
    assert_eq!(sanitize(text), "[click](alert(1))");
}

#[test]
fn code_mentioning_onclick_in_prose_survives() {
    // No leading whitespace inside a tag context, so the attribute pattern
    // must not fire on ordinary prose.
    let text = "The onclick handler should debounce.";
    assert_eq!(sanitize(text), text);
}

#[test]
fn empty_input() {
    assert_eq!(sanitize(""), "");
}
