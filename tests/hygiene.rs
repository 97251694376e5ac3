//! Source hygiene checks.
//!
//! Scans `src/` for patterns that crash a page or quietly drop errors. Each
//! has a budget; lower it when you remove one, never raise it.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// A panic in wasm kills the whole game loop.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;
const MAX_DBG: usize = 0;

const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Leaked closures live as long as the page; only the two listener helpers
// in input.rs may create them.
const MAX_CLOSURE_FORGET: usize = 2;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`. Unit test files and test helpers are
/// skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") || path_str.ends_with("test_support.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check_budget(pattern: &str, max: usize) {
    let hits = count_in_source(&source_files(), pattern);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= max,
        "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}"
    );
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")));
    assert!(!files.iter().any(|f| f.path.ends_with("_test.rs")));
}

#[test]
fn unwrap_budget() {
    check_budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    check_budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    check_budget("panic!(", MAX_PANIC);
}

#[test]
fn todo_budget() {
    check_budget("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    check_budget("unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn dbg_budget() {
    check_budget("dbg!(", MAX_DBG);
}

#[test]
fn silent_discard_budget() {
    check_budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check_budget(".ok()", MAX_DOT_OK);
}

#[test]
fn closure_forget_budget() {
    check_budget(".forget()", MAX_CLOSURE_FORGET);
}
