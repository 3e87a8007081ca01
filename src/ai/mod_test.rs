use super::*;

#[test]
fn estimate_tokens_rounds_up() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("abc"), 1);
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("abcde"), 2);
}

#[test]
fn estimate_tokens_counts_chars_not_bytes() {
    // four multibyte chars → one token
    assert_eq!(estimate_tokens("日本語字"), 1);
}

#[test]
fn run_review_without_key_fails_cleanly() {
    // do not pollute the real environment: only run when the key is absent
    if std::env::var("OPENROUTER_API_KEY").is_err() {
        let opts = RequestOptions {
            provider: client::Provider::Openrouter,
            model: None,
            include_tests: false,
            max_requests_per_minute: 10,
            save: false,
        };
        let err = run_review(std::path::Path::new("."), &opts).unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }
}
