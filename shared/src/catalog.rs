//! Built-in fear catalog the session starts with.

use crate::{Fear, FearId};

const DEFAULT_FEARS: &[&str] = &[
    "The bug only reproduces in production",
    "Release is tomorrow and the build is red",
    "\"It works on my machine\"",
    "A flaky test fails exactly once, during the demo",
    "The requirements changed after testing finished",
    "No logs, no stack trace, just a blank screen",
    "A hotfix goes out without a single check",
    "The test environment is down again",
    "Someone dropped the staging database",
    "The customer found the bug first",
    "A critical bug is closed as \"works as designed\"",
    "Regression suite takes nine hours",
    "The fix breaks three other features",
    "Test data expired overnight",
    "Timezone bug at midnight on New Year's Eve",
    "The only person who understands the module is on vacation",
    "Friday evening deploy",
    "The mock behaves nothing like the real service",
    "Race condition that vanishes under the debugger",
    "Documentation describes a version from two years ago",
    "\"Quick question\" call that lasts two hours",
    "The bug report says only \"nothing works\"",
    "Certificates expired in production",
    "An emoji in the user name crashes the backend",
    "Leap year arithmetic",
    "Pagination skips the last page",
    "Cache that never invalidates",
    "A migration that cannot be rolled back",
    "Load test takes down the shared cluster",
    "Browser update breaks the layout",
    "Third-party API changed without notice",
    "Test passes locally, fails in CI",
    "Silent data corruption",
    "Feature flag left on for everyone",
    "Memory leak that shows up after a week",
    "Security audit next Monday",
    "Automated tests that test nothing",
    "The bug is reassigned back to you",
    "Unreadable error message in someone else's language",
    "The deadline moved closer",
];

/// Returns the built-in catalog, ids starting at 1, nothing revealed.
pub fn default_catalog() -> Vec<Fear> {
    DEFAULT_FEARS
        .iter()
        .enumerate()
        .map(|(index, description)| Fear::new(index as FearId + 1, *description))
        .collect()
}
