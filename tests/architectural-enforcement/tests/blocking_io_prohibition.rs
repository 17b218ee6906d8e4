//! Integration Test: No Blocking in the Render Path
//!
//! **Policy**: the compositor, notification manager and theme run inside the
//! host's frame loop. They MUST NOT sleep or touch the filesystem, network or
//! processes. Time comes from an injected `Clock`; waiting is the host's job.
//!
//! Config loading and the demo binary are outside this policy.

use architectural_enforcement::{assert_clean, find_violations, PURE_MODULES};

const SLEEP_PATTERNS: &[&str] = &[
    "thread::sleep",
    "tokio::time::sleep",
    "time::sleep(",
    "block_on(",
];

const IO_PATTERNS: &[&str] = &[
    "std::fs",
    "tokio::fs",
    "std::net",
    "tokio::net",
    "std::process::Command",
    "std::io::stdin",
    "std::io::stdout",
    "println!",
    "eprintln!",
];

#[test]
fn test_no_sleep_in_render_path() {
    let violations = find_violations(PURE_MODULES, SLEEP_PATTERNS);
    assert_clean(
        "CRITICAL: sleep/blocking wait found in the render path! Drive time through Clock.",
        &violations,
    );
}

#[test]
fn test_no_io_in_render_path() {
    let violations = find_violations(PURE_MODULES, IO_PATTERNS);
    assert_clean(
        "CRITICAL: I/O found in the render path! Return strings and let the host write them.",
        &violations,
    );
}
