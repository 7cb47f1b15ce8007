// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Changeset rendering.
//!
//! Produces one [`ChangesetRecord`] per dependency group and serializes it
//! to the changesets on-disk format: YAML front matter mapping the package
//! to its bump level, a blank line, then the markdown message.

use indexmap::IndexMap;

use crate::config::{BumpLevel, Config};
use crate::error::Result;
use crate::github::PrContext;
use crate::group::DependencyGroup;

mod slug;
mod template;
mod writer;

pub use slug::changeset_slug;
pub use template::{render_message, DEFAULT_TEMPLATE};
pub use writer::{write_changesets, WriteOutcome};

/// A rendered changeset, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRecord {
    /// Package identifier recorded in the front matter.
    pub package: String,

    /// Bump level recorded in the front matter.
    pub bump: BumpLevel,

    /// Rendered markdown message body.
    pub message: String,

    /// Filename stem, derived from the PR branch and update type.
    pub slug: String,

    /// Update type this record was rendered for.
    pub update_type: String,
}

impl ChangesetRecord {
    /// File name for this record.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.slug)
    }

    /// Serialize to the changeset file format.
    pub fn to_file_content(&self) -> String {
        format!(
            "---\n\"{}\": {}\n---\n\n{}\n",
            self.package, self.bump, self.message
        )
    }
}

/// Parse a changeset file's front matter back into its package-to-bump
/// mapping. Returns `None` when the framing or YAML is malformed.
pub fn parse_front_matter(content: &str) -> Option<IndexMap<String, BumpLevel>> {
    let rest = content.strip_prefix("---\n")?;
    let (front, _body) = rest.split_once("\n---")?;
    serde_yaml::from_str(front).ok()
}

/// Render one changeset record per dependency group.
///
/// The template is chosen per group: the update type's own, then the
/// configuration's default, then [`DEFAULT_TEMPLATE`].
pub fn render(
    groups: &[DependencyGroup],
    config: &Config,
    ctx: &PrContext,
    package: &str,
) -> Result<Vec<ChangesetRecord>> {
    let mut records = Vec::with_capacity(groups.len());

    for group in groups {
        let template = config
            .update_types
            .get(&group.update_type)
            .and_then(|t| t.template.as_deref())
            .or(config.default_template.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE);

        let message = template::render_message(group, template)?;
        let slug = slug::changeset_slug(&ctx.head_branch, &group.update_type);

        records.push(ChangesetRecord {
            package: package.to_string(),
            bump: group.bump,
            message,
            slug,
            update_type: group.update_type.clone(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::group::group;

    fn context() -> PrContext {
        PrContext {
            owner: "octo".to_string(),
            repo: "widgets".to_string(),
            number: 5,
            head_branch: "renovate/lodash-4.x".to_string(),
            title: "chore(deps): update dependency lodash to v4.17.21".to_string(),
        }
    }

    fn records_for(files: &[&str], config: &Config) -> Vec<ChangesetRecord> {
        let files: Vec<String> = files.iter().map(|f| (*f).to_string()).collect();
        let classification = classify(&files, config);
        let ctx = context();
        let groups = group(&classification, config, &ctx, "renovate/", false);
        render(&groups, config, &ctx, "my-app").unwrap()
    }

    #[test]
    fn test_one_record_per_group() {
        let config = Config::default();
        let records = records_for(&["package.json", ".github/workflows/ci.yaml"], &config);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.package == "my-app"));
        assert!(records.iter().all(|r| r.bump == BumpLevel::Patch));
    }

    #[test]
    fn test_file_content_shape() {
        let config = Config::default();
        let records = records_for(&["package.json"], &config);
        let content = records[0].to_file_content();
        assert!(content.starts_with("---\n\"my-app\": patch\n---\n\n"));
        assert!(content.contains("lodash"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_front_matter_round_trip() {
        let config = Config::default();
        let records = records_for(&["package.json"], &config);
        let parsed = parse_front_matter(&records[0].to_file_content()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["my-app"], BumpLevel::Patch);
    }

    #[test]
    fn test_parse_front_matter_rejects_malformed() {
        assert!(parse_front_matter("no front matter").is_none());
        assert!(parse_front_matter("---\nunclosed: patch\n").is_none());
    }

    #[test]
    fn test_custom_update_type_template_wins() {
        let mut config = Config::default();
        config.default_template = Some("default: {{dependencies}}".to_string());
        if let Some(npm) = config.update_types.get_mut("npm") {
            npm.template = Some("npm says {{dependencies}}".to_string());
        }
        let records = records_for(&["package.json"], &config);
        assert_eq!(records[0].message, "npm says lodash");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let config = Config::default();
        let first = records_for(&["package.json"], &config);
        let second = records_for(&["package.json"], &config);
        assert_eq!(first, second);
    }
}
