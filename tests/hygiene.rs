//! Source hygiene checks run as tests.
//!
//! Production files under `src/` (everything except `*_test.rs`) are scanned
//! for patterns that either crash the host page or swallow errors. Every
//! budget is zero and is not raised; fix the code instead.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn production_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

/// Fail with a per-file listing when `pattern` occurs more than `max` times.
fn enforce(pattern: &str, max: usize) {
    let hits: Vec<(String, usize)> = production_files()
        .iter()
        .map(|f| (f.path.display().to_string(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let found: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits.iter().map(|(p, n)| format!("  {p}: {n}")).collect::<Vec<_>>().join("\n");
    assert!(found <= max, "`{pattern}` found {found} times, budget {max}:\n{listing}");
}

// Panics.

#[test]
fn no_unwrap() {
    enforce(".unwrap()", 0);
}

#[test]
fn no_expect() {
    enforce(".expect(", 0);
}

#[test]
fn no_panic() {
    enforce("panic!(", 0);
}

#[test]
fn no_unreachable() {
    enforce("unreachable!(", 0);
}

#[test]
fn no_todo() {
    enforce("todo!(", 0);
}

#[test]
fn no_unimplemented() {
    enforce("unimplemented!(", 0);
}

// Silently dropped errors.

#[test]
fn no_silent_discard() {
    enforce("let _ =", 0);
}

#[test]
fn no_dot_ok() {
    enforce(".ok()", 0);
}

// Structure.

#[test]
fn no_allow_dead_code() {
    enforce("#[allow(dead_code)]", 0);
}

#[test]
fn declared_test_modules_exist() {
    for file in production_files() {
        for line in file.content.lines() {
            let Some(rest) = line.trim().strip_prefix("#[path = \"") else {
                continue;
            };
            let Some(name) = rest.split('"').next() else {
                continue;
            };
            let dir = file.path.parent().unwrap_or(Path::new("src"));
            assert!(dir.join(name).is_file(), "{} declares missing test module {name}", file.path.display());
        }
    }
}
