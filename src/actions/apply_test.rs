use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::*;
use crate::review::Priority;

fn suggestion(file: PathBuf, current: Option<&str>, suggested: Option<&str>) -> FixSuggestion {
    FixSuggestion {
        priority: Priority::Medium,
        file,
        description: "test fix".to_string(),
        current_code: current.map(str::to_string),
        suggested_code: suggested.map(str::to_string),
        line_numbers: None,
    }
}

#[test]
fn exact_replacement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    fs::write(&path, "fn main() {\n    let x = 1;\n}\n").unwrap();

    let s = suggestion(path.clone(), Some("let x = 1;"), Some("let x = 2;"));
    assert!(apply_fix_to_file(&s));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "fn main() {\n    let x = 2;\n}\n"
    );
}

#[test]
fn whole_file_exact_replacement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    fs::write(&path, "old body").unwrap();

    let s = suggestion(path.clone(), Some("old body"), Some("new body"));
    assert!(apply_fix_to_file(&s));
    assert_eq!(fs::read_to_string(&path).unwrap(), "new body");
}

#[test]
fn replaces_only_first_occurrence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    fs::write(&path, "x = 1;\nx = 1;\n").unwrap();

    let s = suggestion(path.clone(), Some("x = 1;"), Some("x = 2;"));
    assert!(apply_fix_to_file(&s));
    assert_eq!(fs::read_to_string(&path).unwrap(), "x = 2;\nx = 1;\n");
}

#[test]
fn normalized_whitespace_match() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    // second line indented with a tab in the file, a space in the snippet;
    // the first snippet line appears verbatim so the span can be located
    fs::write(&path, "fn f() {\n    let y = 3;\n\tdone();\n}\n").unwrap();

    let s = suggestion(
        path.clone(),
        Some("let y = 3;\n done();"),
        Some("let y = 4;\n\tdone();"),
    );
    assert!(apply_fix_to_file(&s));
    let updated = fs::read_to_string(&path).unwrap();
    assert!(updated.contains("let y = 4;"), "updated: {updated:?}");
    assert!(updated.ends_with("}\n"));
}

#[test]
fn line_range_match() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    fs::write(&path, "line one\nline two\nline three\n").unwrap();

    let mut s = suggestion(
        path.clone(),
        // snippet differs from the file, so exact and normalized both miss
        Some("something else entirely"),
        Some("LINE 2A\nLINE 2B"),
    );
    s.line_numbers = Some((2, 2));
    // range content must match the snippet; here it does not
    assert!(!apply_fix_to_file(&s));

    s.current_code = Some("line two".to_string());
    // exact match would fire first, so perturb whitespace to force the
    // range strategy path through the normalized comparison
    s.current_code = Some("  line   two  ".to_string());
    assert!(apply_fix_to_file(&s));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "line one\nLINE 2A\nLINE 2B\nline three\n"
    );
}

#[test]
fn no_match_leaves_file_unmodified() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    let original = "fn main() {}\n";
    fs::write(&path, original).unwrap();

    let s = suggestion(path.clone(), Some("nonexistent code"), Some("whatever"));
    assert!(!apply_fix_to_file(&s));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn suggestion_only_is_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    let original = "fn main() {}\n";
    fs::write(&path, original).unwrap();

    let s = suggestion(path.clone(), None, Some("injected()"));
    assert!(!apply_fix_to_file(&s));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().unwrap();
    let s = suggestion(dir.path().join("gone.rs"), Some("a"), Some("b"));
    assert!(!apply_fix_to_file(&s));
}

#[test]
fn path_residue_recleaned() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.rs");
    fs::write(&path, "let z = 0;\n").unwrap();

    // extraction left "(line 1)" glued onto the path
    let dirty = PathBuf::from(format!("{} (line 1)", path.display()));
    let s = suggestion(dirty, Some("let z = 0;"), Some("let z = 9;"));
    assert!(apply_fix_to_file(&s));
    assert_eq!(fs::read_to_string(&path).unwrap(), "let z = 9;\n");
}

#[test]
fn normalize_ws_collapses_runs() {
    assert_eq!(normalize_ws("a\t b\n\n  c"), "a b c");
    assert_eq!(normalize_ws("   "), "");
}
