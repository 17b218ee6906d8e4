//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce the rules the pure
//! rendering components of `arlo-tui` rely on:
//! - No sleeping or blocking I/O in the compositor, notifications or theme
//! - No process-wide mutable state; themes and clocks are passed in
//!
//! The helpers here walk a source tree and hand back only production lines:
//! comments are stripped and everything from `#[cfg(test)]` onward is skipped.

use std::fs;
use std::path::{Path, PathBuf};

/// Library directories that must stay free of I/O and global state
pub const PURE_MODULES: &[&str] = &[
    "tui/src/compositor",
    "tui/src/notifications",
    "tui/src/theme",
];

/// A production source line that matched a forbidden pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub pattern: &'static str,
    pub source: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line,
            self.pattern,
            self.source
        )
    }
}

/// Workspace root, independent of the directory `cargo test` runs in
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Every `.rs` file under `dir`, sorted for stable reports
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production code of a source file as (1-based line number, code) pairs
///
/// Comment text is removed. Scanning stops at the first `#[cfg(test)]`
/// because test modules sit at the bottom of each file.
pub fn production_code(source: &str) -> Vec<(usize, &str)> {
    let mut code = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        let code_part = trimmed.split("//").next().unwrap_or(trimmed).trim_end();
        if !code_part.is_empty() {
            code.push((idx + 1, code_part));
        }
    }
    code
}

/// Scan the given workspace-relative directories for forbidden patterns
pub fn find_violations(dirs: &[&str], patterns: &[&'static str]) -> Vec<Violation> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in dirs {
        for path in rust_files(&root.join(dir)) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            for (line, code) in production_code(&content) {
                for &pattern in patterns {
                    if code.contains(pattern) {
                        violations.push(Violation {
                            path: path.strip_prefix(&root).unwrap_or(&path).to_path_buf(),
                            line,
                            pattern,
                            source: code.to_string(),
                        });
                    }
                }
            }
        }
    }

    violations
}

/// Print violations with a headline and fail the test if there are any
pub fn assert_clean(headline: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {headline}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_code_strips_comments() {
        let source = "let a = 1; // trailing\n// whole line\n/// doc\nlet b = 2;";
        assert_eq!(production_code(source), vec![(1, "let a = 1;"), (4, "let b = 2;")]);
    }

    #[test]
    fn test_production_code_stops_at_test_module() {
        let source = "fn real() {}\n\n#[cfg(test)]\nmod tests {\n    fn fake() {}\n}";
        assert_eq!(production_code(source), vec![(1, "fn real() {}")]);
    }

    #[test]
    fn test_pure_modules_exist() {
        let root = workspace_root();
        for dir in PURE_MODULES {
            assert!(
                !rust_files(&root.join(dir)).is_empty(),
                "{dir} has no sources; scans would pass vacuously"
            );
        }
    }
}
