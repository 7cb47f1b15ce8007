// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pull request host abstraction.
//!
//! Defines the context a run operates on, the trait for talking to the
//! hosting API, and a concrete client backed by the GitHub REST API.

use serde::Deserialize;
use std::path::Path;

use crate::error::GithubError;

mod client;
pub mod comment;

pub use client::GitHubClient;

/// The pull request a run operates on.
///
/// Built once at startup from explicit flags and the CI environment;
/// nothing below the entrypoint reads ambient state.
#[derive(Debug, Clone)]
pub struct PrContext {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Pull request number.
    pub number: u64,

    /// Head branch of the pull request.
    pub head_branch: String,

    /// Pull request title.
    pub title: String,
}

impl PrContext {
    /// Full repository name in "owner/repo" form.
    pub fn full_repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A file changed in a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    /// Repo-relative path.
    #[serde(rename = "filename")]
    pub path: String,

    /// Change status reported by the API (added, modified, removed, ...).
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub additions: u32,

    #[serde(default)]
    pub deletions: u32,
}

/// Pull request metadata used to fill in missing context fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    pub head_ref: String,
}

/// Abstraction over pull-request host operations so the REST client can be
/// swapped for a fake in tests.
pub trait PullRequestHost {
    /// List the files changed in a pull request.
    fn list_changed_files(
        &self,
        ctx: &PrContext,
    ) -> std::result::Result<Vec<ChangedFile>, GithubError>;

    /// Fetch pull request metadata.
    fn get_pull_request(
        &self,
        ctx: &PrContext,
    ) -> std::result::Result<PullRequestInfo, GithubError>;

    /// Post a comment on the pull request.
    fn create_comment(
        &self,
        ctx: &PrContext,
        body: &str,
    ) -> std::result::Result<(), GithubError>;
}

/// Pull-request fields of a GitHub Actions event payload.
#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
    title: Option<String>,
    head: Option<EventRef>,
}

#[derive(Debug, Deserialize)]
struct EventRef {
    #[serde(rename = "ref")]
    ref_name: Option<String>,
}

/// Partial context assembled from a GitHub Actions environment.
#[derive(Debug, Clone, Default)]
pub struct EnvContext {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub number: Option<u64>,
    pub head_branch: Option<String>,
    pub title: Option<String>,
    pub api_base: Option<String>,
}

impl EnvContext {
    /// Read the pieces of context the Actions runner exposes.
    ///
    /// `GITHUB_REPOSITORY` carries owner/repo, `GITHUB_HEAD_REF` the PR
    /// head branch, and the event payload at `GITHUB_EVENT_PATH` the PR
    /// number and title.
    pub fn from_actions_env() -> Self {
        let mut ctx = Self::default();

        if let Ok(repository) = std::env::var("GITHUB_REPOSITORY") {
            if let Some((owner, repo)) = repository.split_once('/') {
                ctx.owner = Some(owner.to_string());
                ctx.repo = Some(repo.to_string());
            }
        }

        if let Ok(head_ref) = std::env::var("GITHUB_HEAD_REF") {
            if !head_ref.is_empty() {
                ctx.head_branch = Some(head_ref);
            }
        }

        if let Ok(api_base) = std::env::var("GITHUB_API_URL") {
            if !api_base.is_empty() {
                ctx.api_base = Some(api_base);
            }
        }

        if let Ok(event_path) = std::env::var("GITHUB_EVENT_PATH") {
            ctx.merge_event_payload(Path::new(&event_path));
        }

        ctx
    }

    fn merge_event_payload(&mut self, path: &Path) {
        let Ok(content) = std::fs::read_to_string(path) else {
            return;
        };
        let Ok(payload) = serde_json::from_str::<EventPayload>(&content) else {
            tracing::debug!("Unparseable event payload at {:?}", path);
            return;
        };
        if let Some(pr) = payload.pull_request {
            self.number.get_or_insert(pr.number);
            if let Some(title) = pr.title {
                self.title.get_or_insert(title);
            }
            if let Some(ref_name) = pr.head.and_then(|h| h.ref_name) {
                self.head_branch.get_or_insert(ref_name);
            }
        }
    }
}
