// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitHub REST client.
//!
//! A thin blocking client over the three endpoints the pipeline needs:
//! listing pull request files, fetching pull request metadata, and posting
//! an issue comment. No retries; the invoking workflow re-runs on transient
//! failures.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::error::GithubError;

use super::{ChangedFile, PrContext, PullRequestHost, PullRequestInfo};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// [`PullRequestHost`] backed by the GitHub REST API.
pub struct GitHubClient {
    http: Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    /// Create a client authenticating with the given token.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();
        if token.is_empty() {
            return Err(GithubError::MissingToken);
        }

        let http = Client::builder()
            .user_agent(concat!("renoset/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GithubError::Request {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            token,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (GitHub Enterprise, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str) -> Result<Response, GithubError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|e| GithubError::Request {
                message: e.to_string(),
            })?;
        check_status(url, response)
    }

    fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, GithubError> {
        response.json().map_err(|e| GithubError::Parse {
            message: e.to_string(),
        })
    }

    fn pull_url(&self, ctx: &PrContext, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}{}",
            self.api_base, ctx.owner, ctx.repo, ctx.number, suffix
        )
    }
}

fn check_status(url: &str, response: Response) -> Result<Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(GithubError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    })
}

impl PullRequestHost for GitHubClient {
    fn list_changed_files(&self, ctx: &PrContext) -> Result<Vec<ChangedFile>, GithubError> {
        let mut files = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}?per_page={}&page={}",
                self.pull_url(ctx, "/files"),
                PER_PAGE,
                page
            );
            let batch: Vec<ChangedFile> = Self::parse(self.get(&url)?)?;
            let batch_len = batch.len();
            files.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            "Listed {} changed files for {}#{}",
            files.len(),
            ctx.full_repo(),
            ctx.number
        );
        Ok(files)
    }

    fn get_pull_request(&self, ctx: &PrContext) -> Result<PullRequestInfo, GithubError> {
        #[derive(Deserialize)]
        struct ApiPull {
            number: u64,
            title: String,
            head: ApiRef,
        }

        #[derive(Deserialize)]
        struct ApiRef {
            #[serde(rename = "ref")]
            ref_name: String,
        }

        let url = self.pull_url(ctx, "");
        let pull: ApiPull = Self::parse(self.get(&url)?)?;
        Ok(PullRequestInfo {
            number: pull.number,
            title: pull.title,
            head_ref: pull.head.ref_name,
        })
    }

    fn create_comment(&self, ctx: &PrContext, body: &str) -> Result<(), GithubError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, ctx.owner, ctx.repo, ctx.number
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&serde_json::json!({ "body": body }))
            .send()
            .map_err(|e| GithubError::Request {
                message: e.to_string(),
            })?;

        check_status(&url, response)?;
        Ok(())
    }
}
