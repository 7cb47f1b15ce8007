// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use indexmap::IndexMap;

use super::schema::{BumpLevel, Config, UpdateTypeConfig};

/// Get the default configuration.
pub fn default_config() -> Config {
    Config::default()
}

/// Built-in update types, in classification priority order.
pub fn default_update_types() -> IndexMap<String, UpdateTypeConfig> {
    let mut types = IndexMap::new();

    types.insert(
        "github-actions".to_string(),
        UpdateTypeConfig {
            patterns: vec![
                ".github/workflows/**".to_string(),
                ".github/actions/**".to_string(),
            ],
            bump: BumpLevel::Patch,
            template: None,
        },
    );

    types.insert(
        "npm".to_string(),
        UpdateTypeConfig {
            patterns: vec![
                "package.json".to_string(),
                "package-lock.json".to_string(),
                "pnpm-lock.yaml".to_string(),
                "pnpm-workspace.yaml".to_string(),
                "yarn.lock".to_string(),
                "**/package.json".to_string(),
                "**/package-lock.json".to_string(),
                "**/pnpm-lock.yaml".to_string(),
                "**/yarn.lock".to_string(),
            ],
            bump: BumpLevel::Patch,
            template: None,
        },
    );

    types.insert(
        "docker".to_string(),
        UpdateTypeConfig {
            patterns: vec![
                "Dockerfile".to_string(),
                "**/Dockerfile".to_string(),
                "**/Dockerfile.*".to_string(),
                "docker-compose.yml".to_string(),
                "docker-compose.yaml".to_string(),
                "**/docker-compose.yml".to_string(),
                "**/docker-compose.yaml".to_string(),
            ],
            bump: BumpLevel::Patch,
            template: None,
        },
    );

    types
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# renoset configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Bump level for files matching no update type below.
default_bump: patch

# Directory changeset files are written to.
changeset_dir: .changeset

# Files dropped before classification.
exclude:
  - "**/node_modules/**"
  - "**/vendor/**"

# Update types are matched in order; the first match wins.
update_types:
  github-actions:
    patterns:
      - ".github/workflows/**"
      - ".github/actions/**"
    bump: patch
    template: "Updated GitHub Actions dependencies: {{dependencies}}"
  npm:
    patterns:
      - "package.json"
      - "**/package.json"
      - "pnpm-lock.yaml"
      - "yarn.lock"
    bump: patch
  docker:
    patterns:
      - "Dockerfile"
      - "**/Dockerfile"
    bump: patch
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.update_types.len(), 3);
        assert_eq!(config.default_bump, BumpLevel::Patch);
    }

    #[test]
    fn test_default_type_order() {
        let types = default_update_types();
        let names: Vec<&String> = types.keys().collect();
        assert_eq!(names, ["github-actions", "npm", "docker"]);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: Config = serde_yaml::from_str(example).expect("Example config should parse");
        assert!(config.update_types.contains_key("github-actions"));
        assert_eq!(config.exclude.len(), 2);
        config.validate().unwrap();
    }
}
