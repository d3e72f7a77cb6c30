//! Hygiene: coding standards enforced at test time.
//!
//! Scans the production sources of the workflow crate for patterns that
//! panic or silently discard an outcome. Every budget is zero: the state
//! machines record failures in the workbench instead.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: PathBuf,
    content: String,
}

/// Production `.rs` files under `src/`. Sibling `_test.rs` files are skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rust = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rust || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

/// Assert that no production line contains `pattern`.
fn assert_absent(pattern: &str) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let hits: Vec<String> = files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(index, line)| format!("  {}:{}: {}", file.path.display(), index + 1, line.trim()))
        })
        .collect();

    assert!(hits.is_empty(), "`{pattern}` is not allowed in workflow/src:\n{}", hits.join("\n"));
}

// =============================================================
// Panics
// =============================================================

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()");
}

#[test]
fn no_expect() {
    assert_absent(".expect(");
}

#[test]
fn no_panic() {
    assert_absent("panic!(");
}

#[test]
fn no_unreachable() {
    assert_absent("unreachable!(");
}

#[test]
fn no_todo_or_unimplemented() {
    assert_absent("todo!(");
    assert_absent("unimplemented!(");
}

// =============================================================
// Silent loss
// =============================================================

#[test]
fn no_discarded_results() {
    assert_absent("let _ =");
}

#[test]
fn no_dot_ok() {
    assert_absent(".ok()");
}

#[test]
fn no_dead_code_allowances() {
    assert_absent("#[allow(dead_code)]");
}
