// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pure glob matching for changed-file paths.
//!
//! Matching is a function of the path string and the pattern list only; no
//! filesystem access. Semantics: `*`, `?` and `[...]` never cross a path
//! separator, `**` does, and matching is case-sensitive with no substring
//! fallback.

use glob::{MatchOptions, Pattern};

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Test a repo-relative path against a single glob pattern.
///
/// Uncompilable patterns match nothing; configuration validation rejects
/// them before classification runs.
pub fn matches(path: &str, pattern: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches_with(path, match_options()))
        .unwrap_or(false)
}

/// Test a path against an ordered pattern list.
pub fn matches_any(path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches(path, pattern))
}
