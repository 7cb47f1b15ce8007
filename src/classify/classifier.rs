// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! File classification into update-type groups.

use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::config::Config;

use super::matcher;

/// Name of the implicit group for files matching no configured update type.
pub const DEFAULT_GROUP: &str = "dependencies";

/// The result of classifying a pull request's changed files.
///
/// Groups are keyed by update-type name in configuration order, with the
/// implicit default group last. Every file appears in at most one group.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub groups: IndexMap<String, BTreeSet<String>>,
}

impl Classification {
    /// Whether no file was classified at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of classified files.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }
}

/// Classify changed files into update-type groups.
///
/// Excluded paths are dropped first. Each remaining path is tested against
/// the update types in configuration order and the first match wins; paths
/// matching nothing land in [`DEFAULT_GROUP`]. Empty groups are not
/// reported.
pub fn classify(changed_files: &[String], config: &Config) -> Classification {
    // Seed in config order so group order is deterministic regardless of
    // which file matches first.
    let mut groups: IndexMap<String, BTreeSet<String>> = config
        .update_types
        .keys()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();
    groups.entry(DEFAULT_GROUP.to_string()).or_default();

    for path in changed_files {
        if matcher::matches_any(path, &config.exclude) {
            tracing::debug!("Excluded from classification: {}", path);
            continue;
        }

        let group = config
            .update_types
            .iter()
            .find(|(_, update_type)| matcher::matches_any(path, &update_type.patterns))
            .map(|(name, _)| name.as_str())
            .unwrap_or(DEFAULT_GROUP);

        groups
            .entry(group.to_string())
            .or_default()
            .insert(path.clone());
    }

    groups.retain(|_, files| !files.is_empty());
    Classification { groups }
}
