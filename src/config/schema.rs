// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from JSON or
//! YAML, inline or from a file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The main configuration structure for renoset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Update types keyed by name, in classification priority order.
    pub update_types: IndexMap<String, UpdateTypeConfig>,

    /// Bump level for files that match no configured update type.
    pub default_bump: BumpLevel,

    /// Glob patterns dropped before classification.
    pub exclude: Vec<String>,

    /// Package identifier to use in changeset front matter. When unset it
    /// is detected from the working directory's package.json.
    pub package: Option<String>,

    /// Directory changeset files are written to, relative to the working
    /// directory.
    pub changeset_dir: String,

    /// Message template for update types without their own.
    pub default_template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_types: super::default::default_update_types(),
            default_bump: BumpLevel::Patch,
            exclude: Vec::new(),
            package: None,
            changeset_dir: ".changeset".to_string(),
            default_template: None,
        }
    }
}

impl Config {
    /// Load configuration from inline text and/or a file path.
    pub fn load(inline: Option<&str>, file: Option<&std::path::Path>) -> Result<Self> {
        super::loader::load_config(inline, file)
    }

    /// Validate configuration invariants.
    ///
    /// Every update type must have at least one pattern, and every pattern
    /// (including excludes) must be a compilable glob. Pattern problems are
    /// caught here so classification itself cannot fail.
    pub fn validate(&self) -> Result<()> {
        for (name, update_type) in &self.update_types {
            if update_type.patterns.is_empty() {
                return Err(ConfigError::EmptyPatterns { name: name.clone() }.into());
            }
            for pattern in &update_type.patterns {
                compile_check(name, pattern)?;
            }
        }
        for pattern in &self.exclude {
            compile_check("exclude", pattern)?;
        }
        Ok(())
    }
}

fn compile_check(name: &str, pattern: &str) -> Result<()> {
    glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// One dependency ecosystem's classification bucket.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpdateTypeConfig {
    /// Glob patterns identifying this ecosystem's manifest files.
    pub patterns: Vec<String>,

    /// Changeset bump level applied to this update type.
    pub bump: BumpLevel,

    /// Message template. Placeholders: {{dependencies}}, {{version}},
    /// {{update_type}}.
    pub template: Option<String>,
}

/// Semantic-version bump level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    #[default]
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// Get the string representation of the bump level.
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        }
    }
}

impl std::str::FromStr for BumpLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patch" => Ok(BumpLevel::Patch),
            "minor" => Ok(BumpLevel::Minor),
            "major" => Ok(BumpLevel::Major),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
