// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.
//!
//! Configuration arrives as inline JSON/YAML text, a file path, or both.
//! The file is the base and inline text overrides it, with a shallow merge
//! per update-type entry. Both sources parse into [`ConfigOverlay`] (all
//! fields optional) so the merge rules stay explicit: override wins unless
//! unset.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use super::schema::{BumpLevel, Config, UpdateTypeConfig};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &[
    "renoset.json",
    "renoset.yaml",
    "renoset.yml",
    ".github/renoset.json",
    ".github/renoset.yaml",
    ".github/renoset.yml",
];

/// A partially specified configuration, as parsed from one source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub update_types: Option<IndexMap<String, UpdateTypeOverlay>>,
    pub default_bump: Option<BumpLevel>,
    pub exclude: Option<Vec<String>>,
    pub package: Option<String>,
    pub changeset_dir: Option<String>,
    pub default_template: Option<String>,
}

/// A partially specified update type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTypeOverlay {
    pub patterns: Option<Vec<String>>,
    pub bump: Option<BumpLevel>,
    pub template: Option<String>,
}

/// Find a configuration file under the working directory.
pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from inline text and/or a file path.
///
/// With neither source the built-in defaults are returned. The result is
/// always validated.
pub fn load_config(inline: Option<&str>, file: Option<&Path>) -> Result<Config> {
    let file_overlay = match file {
        Some(path) => Some(load_overlay_from(path)?),
        None => None,
    };

    let inline_overlay = match inline {
        Some(text) => Some(parse_overlay(text, None)?),
        None => None,
    };

    let config = match (file_overlay, inline_overlay) {
        (None, None) => {
            tracing::debug!("No configuration supplied, using defaults");
            Config::default()
        }
        (Some(base), None) => resolve(base),
        (None, Some(overlay)) => resolve(overlay),
        (Some(base), Some(overlay)) => resolve(merge_overlays(base, overlay)),
    };

    config.validate()?;
    Ok(config)
}

/// Parse an overlay from a file.
fn load_overlay_from(path: &Path) -> Result<ConfigOverlay> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        message: format!("Failed to read config file: {}", e),
    })?;

    let extension = path.extension().and_then(|e| e.to_str());
    parse_overlay(&content, extension)
}

/// Parse an overlay from JSON or YAML text.
///
/// A known file extension selects the format; otherwise JSON is tried
/// first and YAML second.
pub fn parse_overlay(content: &str, extension: Option<&str>) -> Result<ConfigOverlay> {
    match extension {
        Some("json") => serde_json::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
            }
            .into()
        }),
        Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
            }
            .into()
        }),
        _ => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| {
                ConfigError::ParseError {
                    message: format!("Failed to parse as JSON or YAML: {}", e),
                }
                .into()
            }),
    }
}

/// Merge two overlays, with the overlay argument taking precedence.
///
/// Update-type entries merge field-by-field; entries only present in the
/// overlay are appended after the base's, preserving classification order.
pub fn merge_overlays(base: ConfigOverlay, overlay: ConfigOverlay) -> ConfigOverlay {
    let update_types = match (base.update_types, overlay.update_types) {
        (Some(mut base_types), Some(overlay_types)) => {
            for (name, over) in overlay_types {
                match base_types.get_mut(&name) {
                    Some(entry) => {
                        if over.patterns.is_some() {
                            entry.patterns = over.patterns;
                        }
                        if over.bump.is_some() {
                            entry.bump = over.bump;
                        }
                        if over.template.is_some() {
                            entry.template = over.template;
                        }
                    }
                    None => {
                        base_types.insert(name, over);
                    }
                }
            }
            Some(base_types)
        }
        (base_types, overlay_types) => overlay_types.or(base_types),
    };

    ConfigOverlay {
        update_types,
        default_bump: overlay.default_bump.or(base.default_bump),
        exclude: overlay.exclude.or(base.exclude),
        package: overlay.package.or(base.package),
        changeset_dir: overlay.changeset_dir.or(base.changeset_dir),
        default_template: overlay.default_template.or(base.default_template),
    }
}

/// Resolve an overlay into a full configuration, filling unset fields with
/// defaults. Update types fall back to the built-in set only when the
/// overlay defines none at all.
fn resolve(overlay: ConfigOverlay) -> Config {
    let update_types = match overlay.update_types {
        Some(types) => types
            .into_iter()
            .map(|(name, over)| {
                (
                    name,
                    UpdateTypeConfig {
                        patterns: over.patterns.unwrap_or_default(),
                        bump: over.bump.unwrap_or_default(),
                        template: over.template,
                    },
                )
            })
            .collect(),
        None => super::default::default_update_types(),
    };

    Config {
        update_types,
        default_bump: overlay.default_bump.unwrap_or_default(),
        exclude: overlay.exclude.unwrap_or_default(),
        package: overlay.package,
        changeset_dir: overlay
            .changeset_dir
            .unwrap_or_else(|| ".changeset".to_string()),
        default_template: overlay.default_template,
    }
}
