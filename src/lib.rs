// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! renoset - Changeset Generator for Dependency-Update PRs
//!
//! A CLI tool that turns an automated dependency-update pull request into
//! changeset files for release automation.
//!
//! # Features
//!
//! - **File Classification**: Glob-based mapping of changed files onto
//!   configured update types, first match wins
//! - **Dependency Grouping**: Dependency names and versions recovered from
//!   Renovate's conventional branch names and PR titles
//! - **Templated Changesets**: Per-update-type changelog templates with
//!   placeholder substitution
//! - **Re-run Safe**: Deterministic changeset naming makes repeated runs on
//!   the same PR skip what is already covered
//! - **PR Comments**: Optional best-effort summary comment on the PR
//!
//! # Example
//!
//! ```no_run
//! use renoset::config::Config;
//! use renoset::classify::classify;
//!
//! // Load configuration (built-in defaults here)
//! let config = Config::load(None, None).unwrap();
//!
//! // Classify a PR's changed files
//! let files = vec!["package.json".to_string()];
//! let classification = classify(&files, &config);
//! for (update_type, files) in &classification.groups {
//!     println!("{}: {} file(s)", update_type, files.len());
//! }
//! ```

// Module declarations
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod group;
pub mod render;

// Re-exports for convenience
pub use config::Config;
pub use error::{RenosetError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of renoset.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
