//! Discovery of reviewable source files.
//!
//! Walks the project with gitignore support, skips `.git` and (by default)
//! test directories and test-named files, and keeps only files whose
//! extension is on the reviewable allowlist. Binary files and files over
//! the size cap are dropped; shipping a bundle or a lockfile to the model
//! wastes tokens and poisons the review.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Test directory names to exclude unless `--include-tests` is passed.
pub const TEST_DIRS: &[&str] = &["tests", "test", "__tests__", "spec"];

/// Extensions worth sending for review.
pub const SOURCE_EXTS: &[&str] = &[
    "rs", "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "go", "java", "kt", "rb", "php", "swift",
    "scala", "cs", "c", "h", "cc", "cpp", "hpp", "sh", "sql", "vue", "svelte",
];

/// Files larger than this are skipped; they are almost always generated.
const MAX_FILE_BYTES: u64 = 128 * 1024;

/// Check whether a file matches a test naming pattern for its language.
pub fn is_test_file(path: &Path) -> bool {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };

    let Some(dot) = file_name.rfind('.') else {
        return false;
    };
    let ext = &file_name[dot + 1..];
    let base = &file_name[..dot];

    match ext {
        "rs" | "go" => base.ends_with("_test"),
        "py" => base.starts_with("test_") || base.ends_with("_test"),
        "rb" => base.ends_with("_test") || base.ends_with("_spec"),
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => {
            base.ends_with(".test") || base.ends_with(".spec")
        }
        "java" | "kt" | "cs" | "swift" => base.ends_with("Test") || base.ends_with("Tests"),
        "scala" => base.ends_with("Test") || base.ends_with("Spec"),
        "c" | "cc" | "cpp" => base.ends_with("_test") || base.starts_with("test_"),
        "php" => base.ends_with("Test") || base.ends_with("_test"),
        _ => false,
    }
}

/// True when the extension is on the reviewable allowlist.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Check whether a reader points to a binary file by looking for null bytes
/// in the first 512 bytes. Resets the reader position afterward.
fn is_binary_reader<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 512];
    let n = reader.read(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(header[..n].contains(&0))
}

/// Collect reviewable source files under `root` in walk order.
/// Unreadable entries are skipped with a warning; discovery never fails.
pub fn discover(root: &Path, include_tests: bool) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if entry.file_name() == ".git" {
                    return false;
                }
                if !include_tests
                    && let Some(name) = entry.file_name().to_str()
                    && TEST_DIRS.contains(&name)
                {
                    return false;
                }
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("warning: skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !is_source_file(path) {
            continue;
        }
        if !include_tests && is_test_file(path) {
            continue;
        }
        if entry
            .metadata()
            .map(|m| m.len() > MAX_FILE_BYTES)
            .unwrap_or(true)
        {
            continue;
        }
        match File::open(path).and_then(|mut f| is_binary_reader(&mut f)) {
            Ok(false) => files.push(path.to_path_buf()),
            Ok(true) => {}
            Err(err) => eprintln!("warning: cannot read {}: {err}", path.display()),
        }
    }
    files
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
