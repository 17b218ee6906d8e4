//! Integration Test: No Process-Wide State
//!
//! **Policy**: themes, configuration and clocks are values handed to the
//! components that use them. Hidden globals couple modules together and make
//! concurrent managers interfere, so the pure modules may not declare any.
//! Plain `const` items are fine.

use architectural_enforcement::{assert_clean, find_violations, PURE_MODULES};

const GLOBAL_PATTERNS: &[&str] = &[
    "static mut",
    "lazy_static!",
    "thread_local!",
    "OnceLock",
    "OnceCell",
    "LazyLock",
];

#[test]
fn test_no_global_state_in_pure_modules() {
    let violations = find_violations(PURE_MODULES, GLOBAL_PATTERNS);
    assert_clean(
        "CRITICAL: global state found! Pass it in through ToastTheme, ToastConfig or Clock.",
        &violations,
    );
}

#[test]
fn test_no_unwrap_in_pure_modules() {
    let violations = find_violations(PURE_MODULES, &[".unwrap()", ".expect("]);
    assert_clean(
        "CRITICAL: panicking unwrap found in the render path! Clamp or fall back instead.",
        &violations,
    );
}
