// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Dependency grouping.
//!
//! Turns a [`Classification`] into one [`DependencyGroup`] per non-empty
//! update type, carrying the bump level from configuration and the
//! dependency names extracted from the pull request.

use crate::classify::{Classification, DEFAULT_GROUP};
use crate::config::{BumpLevel, Config};
use crate::github::PrContext;

pub mod renovate;

/// One update type's worth of pending changes.
#[derive(Debug, Clone)]
pub struct DependencyGroup {
    /// Update-type name (or [`DEFAULT_GROUP`] for unmatched files).
    pub update_type: String,

    /// Bump level to record in the changeset.
    pub bump: BumpLevel,

    /// Dependency names implicated by the PR; may be empty.
    pub dependencies: Vec<String>,

    /// Version descriptor, when one could be extracted.
    pub version: Option<String>,

    /// Number of changed files classified into this group.
    pub file_count: usize,
}

impl DependencyGroup {
    /// Human-readable dependency list, or a generic descriptor when no
    /// names could be extracted.
    pub fn descriptor(&self) -> String {
        if self.dependencies.is_empty() {
            "dependencies".to_string()
        } else {
            self.dependencies.join(", ")
        }
    }
}

/// Derive dependency groups from a classification.
///
/// Groups come out in the classification's order (configuration order,
/// default group last). With `sort` set, dependency names are ordered
/// alphabetically inside each group.
pub fn group(
    classification: &Classification,
    config: &Config,
    ctx: &PrContext,
    branch_prefix: &str,
    sort: bool,
) -> Vec<DependencyGroup> {
    let parsed = renovate::parse_update(&ctx.title, &ctx.head_branch, branch_prefix);

    classification
        .groups
        .iter()
        .map(|(name, files)| {
            let bump = match config.update_types.get(name) {
                Some(update_type) => update_type.bump,
                None => {
                    debug_assert_eq!(name, DEFAULT_GROUP);
                    config.default_bump
                }
            };

            let mut dependencies = parsed.dependencies.clone();
            if sort {
                dependencies.sort();
            }

            DependencyGroup {
                update_type: name.clone(),
                bump,
                dependencies,
                version: parsed.version.clone(),
                file_count: files.len(),
            }
        })
        .collect()
}
