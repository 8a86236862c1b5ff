//! Hygiene: source-level rules for the pinboard crate, checked at test time.
//!
//! Each rule scans the production sources under `src/` (sibling `*_test.rs`
//! files are skipped) and carries a budget. Budgets only ever go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Rule {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics: a panic on the input path freezes the board.
const PANICS: &[Rule] = &[
    Rule { pattern: ".unwrap()", max: 0, why: "propagate with ? or handle the None/Err" },
    Rule { pattern: ".expect(", max: 0, why: "propagate with ? or handle the None/Err" },
    Rule { pattern: "panic!(", max: 0, why: "return a ViewportError instead" },
    Rule { pattern: "unreachable!(", max: 0, why: "model the state so it cannot occur" },
    Rule { pattern: "todo!(", max: 0, why: "stubs do not ship" },
    Rule { pattern: "unimplemented!(", max: 0, why: "stubs do not ship" },
];

// Silent loss: errors must be logged or returned.
const SILENT_LOSS: &[Rule] = &[
    Rule { pattern: "let _ =", max: 0, why: "inspect the result" },
    Rule { pattern: ".ok()", max: 0, why: "inspect the error before discarding it" },
];

// Platform and style.
const STYLE: &[Rule] = &[
    Rule { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
    Rule { pattern: "std::time::Instant", max: 0, why: "wasm32 has no clock; take timestamps as arguments" },
    Rule { pattern: "println!(", max: 0, why: "log through tracing" },
    Rule { pattern: "eprintln!(", max: 0, why: "log through tracing" },
];

struct SourceFile {
    path: String,
    content: String,
}

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
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(rules: &[Rule]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");
    let mut failures = Vec::new();
    for rule in rules {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > rule.max {
            let listing = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("`{}` found {count}, max {} ({})\n{listing}", rule.pattern, rule.max, rule.why));
        }
    }
    assert!(failures.is_empty(), "hygiene budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn panic_budget() {
    check(PANICS);
}

#[test]
fn silent_loss_budget() {
    check(SILENT_LOSS);
}

#[test]
fn style_budget() {
    check(STYLE);
}
