// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Heuristics for Renovate's conventional PR titles and branch names.
//!
//! Renovate titles follow a small family of shapes ("chore(deps): update
//! dependency lodash to v4.17.21", "update react monorepo to v18",
//! "update actions/checkout action to v4") and branches encode a slug
//! ("renovate/lodash-4.x"). Extraction is best-effort; callers fall back to
//! a generic descriptor when nothing matches.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "update dependency <name> to <version>"
    static ref TITLE_DEPENDENCY: Regex =
        Regex::new(r"(?i)\bupdate\s+dependency\s+(?P<name>\S+)\s+to\s+(?P<version>\S+)").unwrap();

    /// "update <name> action|monorepo|digest|docker tag to <version>"
    static ref TITLE_QUALIFIED: Regex = Regex::new(
        r"(?i)\bupdate\s+(?P<name>\S+)\s+(?:action|monorepo|digest|docker\s+tag)\s+to\s+(?P<version>\S+)"
    )
    .unwrap();

    /// "update <name> to <version>" with a version-looking target.
    static ref TITLE_GENERIC: Regex =
        Regex::new(r"(?i)\bupdate\s+(?P<name>.+?)\s+to\s+(?P<version>v?\d[\w.\-]*)").unwrap();

    /// Trailing version segment of a branch slug ("lodash-4.x", "node-20").
    static ref BRANCH_VERSION_SUFFIX: Regex =
        Regex::new(r"-(?P<version>\d+(?:\.\d+)*(?:\.x)?)$").unwrap();
}

/// Branch slugs that carry no dependency name at all.
const NAMELESS_SLUGS: &[&str] = &["lock-file-maintenance", "pin-dependencies", "configure"];

/// Dependency names and version extracted from a PR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUpdate {
    pub dependencies: Vec<String>,
    pub version: Option<String>,
}

impl ParsedUpdate {
    fn single(name: &str, version: Option<&str>) -> Self {
        Self {
            dependencies: vec![name.to_string()],
            version: version.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Extract the dependency and version from a PR title.
pub fn parse_title(title: &str) -> Option<ParsedUpdate> {
    for regex in [&*TITLE_DEPENDENCY, &*TITLE_QUALIFIED, &*TITLE_GENERIC] {
        if let Some(captures) = regex.captures(title) {
            let name = captures.name("name").map(|m| m.as_str())?;
            let version = captures.name("version").map(|m| m.as_str());
            return Some(ParsedUpdate::single(name, version));
        }
    }
    None
}

/// Extract the dependency and version from a branch name.
///
/// The configured branch prefix is stripped first; without it the branch is
/// not treated as a dependency-update branch.
pub fn parse_branch(branch: &str, branch_prefix: &str) -> Option<ParsedUpdate> {
    let slug = branch.strip_prefix(branch_prefix)?;
    if slug.is_empty() || NAMELESS_SLUGS.contains(&slug) {
        return None;
    }

    // Leading bump qualifiers are routing, not identity.
    let slug = slug
        .strip_prefix("major-")
        .or_else(|| slug.strip_prefix("minor-"))
        .or_else(|| slug.strip_prefix("patch-"))
        .or_else(|| slug.strip_prefix("pin-"))
        .unwrap_or(slug);

    match BRANCH_VERSION_SUFFIX.captures(slug) {
        Some(captures) => {
            let version = captures.name("version").map(|m| m.as_str().to_string());
            let name = &slug[..captures.get(0).map(|m| m.start()).unwrap_or(slug.len())];
            if name.is_empty() {
                return None;
            }
            Some(ParsedUpdate {
                dependencies: vec![name.to_string()],
                version,
            })
        }
        None => Some(ParsedUpdate::single(slug, None)),
    }
}

/// Extract from the title, falling back to the branch, falling back to
/// nothing.
pub fn parse_update(title: &str, branch: &str, branch_prefix: &str) -> ParsedUpdate {
    parse_title(title)
        .or_else(|| parse_branch(branch, branch_prefix))
        .unwrap_or_default()
}
