// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and the generate pipeline.
//!
//! The pipeline is strictly linear: load config, resolve context, list
//! changed files, classify, group, render, write, optionally comment,
//! report. Any fatal error unwinds to `run`'s caller; only commenting is
//! best-effort.

use console::style;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classify::classify;
use crate::config::{example_config, Config};
use crate::error::{RenosetError, Result, ResultExt};
use crate::github::{comment, EnvContext, GitHubClient, PrContext, PullRequestHost};
use crate::group::group;
use crate::render::{render, write_changesets, ChangesetRecord, WriteOutcome};

use super::args::{Cli, Commands, GenerateArgs, InitArgs, OutputFormat};

/// The run's declared outputs.
#[derive(Debug, Default, serde::Serialize)]
pub struct ActionResult {
    /// Number of changeset files created.
    pub created: usize,

    /// Paths of the created files.
    pub files: Vec<String>,

    /// Changesets skipped because an identical one already existed.
    pub skipped: usize,

    /// Whether a summary comment was posted.
    pub commented: bool,
}

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Generate(args) => run_generate(&cli, args),
        Commands::Init(args) => run_init(&cli, args),
        Commands::Version => run_version(),
    }
}

/// Run the generate command against the real GitHub API.
///
/// Configuration is loaded before anything else so a malformed config
/// fails the run before any file is listed or written.
fn run_generate(cli: &Cli, args: GenerateArgs) -> Result<()> {
    tracing::debug!("Running generate command with args: {:?}", args);

    let config_file = resolve_config_file(&cli.working_directory, args.config_file.as_deref());
    let config = Config::load(args.config.as_deref(), config_file.as_deref())?;

    let env = EnvContext::from_actions_env();
    let ctx = resolve_context(&args, &env)?;

    let token = args.token.clone().unwrap_or_default();
    let mut client = GitHubClient::new(token)?;
    if let Some(api_base) = &env.api_base {
        client = client.with_api_base(api_base);
    }

    let result = generate(cli, &args, &config, &client, ctx)?;
    report(cli, &result)?;
    Ok(())
}

/// The generate pipeline, parameterized over the host for testability.
pub fn generate(
    cli: &Cli,
    args: &GenerateArgs,
    config: &Config,
    host: &dyn PullRequestHost,
    mut ctx: PrContext,
) -> Result<ActionResult> {
    // Fill context fields the environment could not provide.
    if ctx.title.is_empty() || ctx.head_branch.is_empty() {
        let info = host.get_pull_request(&ctx)?;
        if ctx.title.is_empty() {
            ctx.title = info.title;
        }
        if ctx.head_branch.is_empty() {
            ctx.head_branch = info.head_ref;
        }
    }

    if !args.skip_branch_prefix_check && !ctx.head_branch.starts_with(&args.branch_prefix) {
        tracing::debug!(
            "Branch '{}' lacks prefix '{}', nothing to do",
            ctx.head_branch,
            args.branch_prefix
        );
        return Ok(ActionResult::default());
    }

    let changed = host.list_changed_files(&ctx)?;
    let paths: Vec<String> = changed.into_iter().map(|f| f.path).collect();
    tracing::debug!("Pull request changes {} files", paths.len());

    let classification = classify(&paths, config);
    if classification.is_empty() {
        tracing::debug!("No classifiable changes, nothing to do");
        return Ok(ActionResult::default());
    }

    let groups = group(&classification, config, &ctx, &args.branch_prefix, args.sort);
    let package = resolve_package(&cli.working_directory, config, &ctx);
    let records = render(&groups, config, &ctx, &package)?;

    let outcome = if cli.dry_run {
        print_dry_run(&records);
        WriteOutcome::default()
    } else {
        let dir = cli.working_directory.join(&config.changeset_dir);
        write_changesets(&records, &dir)?
    };

    let mut result = ActionResult {
        created: outcome.written.len(),
        files: outcome
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        skipped: outcome.skipped.len(),
        commented: false,
    };

    if args.comment_pr {
        let body = comment::comment_body(&records, cli.dry_run);
        result.commented = comment::post_summary(host, &ctx, &body);
    }

    Ok(result)
}

/// Resolve the pull request context from flags and the CI environment.
fn resolve_context(args: &GenerateArgs, env: &EnvContext) -> Result<PrContext> {
    let (owner, repo) = match &args.repo {
        Some(full) => {
            let (owner, repo) = full.split_once('/').ok_or_else(|| {
                RenosetError::MissingContext(format!("--repo must be owner/name, got '{}'", full))
            })?;
            (owner.to_string(), repo.to_string())
        }
        None => match (&env.owner, &env.repo) {
            (Some(owner), Some(repo)) => (owner.clone(), repo.clone()),
            _ => {
                return Err(RenosetError::MissingContext(
                    "repository; pass --repo or set GITHUB_REPOSITORY".to_string(),
                ))
            }
        },
    };

    let number = args.pr.or(env.number).ok_or_else(|| {
        RenosetError::MissingContext(
            "pull request number; pass --pr or run on a pull_request event".to_string(),
        )
    })?;

    Ok(PrContext {
        owner,
        repo,
        number,
        head_branch: args
            .branch
            .clone()
            .or_else(|| env.head_branch.clone())
            .unwrap_or_default(),
        title: args
            .title
            .clone()
            .or_else(|| env.title.clone())
            .unwrap_or_default(),
    })
}

fn resolve_config_file(working_directory: &Path, config_file: Option<&Path>) -> Option<PathBuf> {
    match config_file {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(working_directory.join(path)),
        None => crate::config::find_config_file_in(working_directory),
    }
}

/// Pick the package identifier for changeset front matter.
///
/// Order: explicit configuration, the working directory's package.json
/// name, the repository name.
fn resolve_package(working_directory: &Path, config: &Config, ctx: &PrContext) -> String {
    if let Some(package) = &config.package {
        return package.clone();
    }

    let manifest = working_directory.join("package.json");
    if let Ok(content) = std::fs::read_to_string(&manifest) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
            if let Some(name) = json.get("name").and_then(|n| n.as_str()) {
                return name.to_string();
            }
        }
    }

    ctx.repo.clone()
}

fn print_dry_run(records: &[ChangesetRecord]) {
    println!(
        "{} dry run, {} changeset(s) would be written:",
        style("→").cyan(),
        records.len()
    );
    for record in records {
        println!("\n{}", style(record.file_name()).bold());
        for line in record.to_file_content().lines() {
            println!("  {}", style(line).dim());
        }
    }
}

/// Print the run's outputs and mirror them to `GITHUB_OUTPUT` when the
/// runner provides one.
fn report(cli: &Cli, result: &ActionResult) -> Result<()> {
    let files_json =
        serde_json::to_string(&result.files).unwrap_or_else(|_| "[]".to_string());

    match cli.format {
        Some(OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::json!({
                    "changesets-created": result.created,
                    "changeset-files": result.files,
                    "changesets-skipped": result.skipped,
                    "commented": result.commented,
                })
            );
        }
        _ => {
            if result.created == 0 && result.skipped == 0 {
                println!("{} no changesets to create", style("✓").green());
            } else {
                println!(
                    "{} {} changeset(s) created, {} already covered",
                    style("✓").green(),
                    result.created,
                    result.skipped
                );
                for file in &result.files {
                    println!("  {}", file);
                }
            }
            println!("changesets-created: {}", result.created);
            println!("changeset-files: {}", files_json);
        }
    }

    if let Ok(output_path) = std::env::var("GITHUB_OUTPUT") {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_path)
            .context("Failed to open GITHUB_OUTPUT")?;
        writeln!(output, "changesets-created={}", result.created)
            .and_then(|()| writeln!(output, "changeset-files={}", files_json))
            .context("Failed to write GITHUB_OUTPUT")?;
    }

    Ok(())
}

/// Run the init command.
fn run_init(cli: &Cli, args: InitArgs) -> Result<()> {
    let path = cli.working_directory.join("renoset.yaml");

    if path.exists() && !args.force {
        return Err(RenosetError::WithContext {
            context: "init".to_string(),
            message: format!("{} already exists (use --force to overwrite)", path.display()),
        });
    }

    std::fs::write(&path, example_config())?;
    println!("{} wrote {}", style("✓").green(), path.display());
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("renoset {}", crate::version::version_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GithubError;
    use crate::github::{ChangedFile, PullRequestInfo};
    use clap::Parser;
    use tempfile::TempDir;

    struct FakeHost {
        files: Vec<&'static str>,
        comment_fails: bool,
        listed: std::cell::Cell<bool>,
    }

    impl FakeHost {
        fn with_files(files: Vec<&'static str>) -> Self {
            Self {
                files,
                comment_fails: false,
                listed: std::cell::Cell::new(false),
            }
        }
    }

    impl PullRequestHost for FakeHost {
        fn list_changed_files(
            &self,
            _ctx: &PrContext,
        ) -> std::result::Result<Vec<ChangedFile>, GithubError> {
            self.listed.set(true);
            Ok(self
                .files
                .iter()
                .map(|path| ChangedFile {
                    path: (*path).to_string(),
                    status: "modified".to_string(),
                    additions: 1,
                    deletions: 1,
                })
                .collect())
        }

        fn get_pull_request(
            &self,
            _ctx: &PrContext,
        ) -> std::result::Result<PullRequestInfo, GithubError> {
            Ok(PullRequestInfo {
                number: 1,
                title: "chore(deps): update dependency lodash to v4.17.21".to_string(),
                head_ref: "renovate/lodash-4.x".to_string(),
            })
        }

        fn create_comment(
            &self,
            _ctx: &PrContext,
            _body: &str,
        ) -> std::result::Result<(), GithubError> {
            if self.comment_fails {
                Err(GithubError::Status {
                    status: 500,
                    url: "https://api.github.com".to_string(),
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn context(branch: &str, title: &str) -> PrContext {
        PrContext {
            owner: "octo".to_string(),
            repo: "widgets".to_string(),
            number: 1,
            head_branch: branch.to_string(),
            title: title.to_string(),
        }
    }

    fn cli_for(dir: &TempDir) -> Cli {
        Cli::parse_from(["renoset", "-C", dir.path().to_str().unwrap()])
    }

    fn run_with_files(files: Vec<&'static str>) -> (TempDir, ActionResult) {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(files);
        let ctx = context(
            "renovate/lodash-4.x",
            "chore(deps): update dependency lodash to v4.17.21",
        );
        let result = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        (dir, result)
    }

    #[test]
    fn test_workflow_change_creates_one_patch_changeset() {
        let (dir, result) = run_with_files(vec![".github/workflows/ci.yaml"]);
        assert_eq!(result.created, 1);

        let content = std::fs::read_to_string(&result.files[0]).unwrap();
        assert!(content.contains("\"widgets\": patch"));
        drop(dir);
    }

    #[test]
    fn test_npm_manifest_and_lockfile_create_one_changeset() {
        let (_dir, result) = run_with_files(vec!["package.json", "pnpm-lock.yaml"]);
        assert_eq!(result.created, 1);
    }

    #[test]
    fn test_mixed_ecosystems_create_two_changesets() {
        let (_dir, result) = run_with_files(vec!["package.json", ".github/workflows/ci.yaml"]);
        assert_eq!(result.created, 2);
    }

    #[test]
    fn test_unmatched_file_uses_default_type() {
        let (dir, result) = run_with_files(vec!["random/unmatched/file.txt"]);
        assert_eq!(result.created, 1);
        let content = std::fs::read_to_string(&result.files[0]).unwrap();
        assert!(content.contains("patch"));
        drop(dir);
    }

    #[test]
    fn test_empty_file_list_is_success_with_no_output() {
        let (_dir, result) = run_with_files(vec![]);
        assert_eq!(result.created, 0);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_branch_prefix_check_short_circuits() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context("feature/new-ui", "add new ui");

        let result = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        assert_eq!(result.created, 0);
        assert!(!host.listed.get());
    }

    #[test]
    fn test_skip_branch_prefix_check() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context("feature/manual-bump", "bump things");
        let args = GenerateArgs {
            skip_branch_prefix_check: true,
            ..GenerateArgs::default()
        };

        let result = generate(&cli, &args, &Config::default(), &host, ctx).unwrap();
        assert_eq!(result.created, 1);
    }

    #[test]
    fn test_resolve_config_file_relative_to_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("custom.yaml"), "{}").unwrap();
        let resolved = resolve_config_file(dir.path(), Some(Path::new("custom.yaml"))).unwrap();
        assert_eq!(resolved, dir.path().join("custom.yaml"));

        // Without an explicit flag, discovery falls back to well-known names.
        std::fs::write(dir.path().join("renoset.yaml"), "{}").unwrap();
        let discovered = resolve_config_file(dir.path(), None).unwrap();
        assert_eq!(discovered, dir.path().join("renoset.yaml"));
    }

    #[test]
    fn test_comment_failure_does_not_fail_run() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost {
            files: vec!["package.json"],
            comment_fails: true,
            listed: std::cell::Cell::new(false),
        };
        let ctx = context(
            "renovate/lodash-4.x",
            "chore(deps): update dependency lodash to v4.17.21",
        );
        let args = GenerateArgs {
            comment_pr: true,
            ..GenerateArgs::default()
        };

        let result = generate(&cli, &args, &Config::default(), &host, ctx).unwrap();
        assert_eq!(result.created, 1);
        assert!(!result.commented);
        assert!(std::path::Path::new(&result.files[0]).exists());
    }

    #[test]
    fn test_rerun_skips_existing_changesets() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context(
            "renovate/lodash-4.x",
            "chore(deps): update dependency lodash to v4.17.21",
        );

        let first = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx.clone()).unwrap();
        assert_eq!(first.created, 1);

        let second = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["renoset", "--dry-run", "-C", dir.path().to_str().unwrap()]);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context("renovate/lodash-4.x", "update dependency lodash to v4");

        let result = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        assert_eq!(result.created, 0);
        assert!(!dir.path().join(".changeset").exists());
    }

    #[test]
    fn test_context_fills_from_host_when_env_lacks_it() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context("", "");

        let result = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        // Filled head branch passes the prefix check and generates.
        assert_eq!(result.created, 1);
    }

    #[test]
    fn test_package_detected_from_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "@octo/widgets-app"}"#,
        )
        .unwrap();
        let cli = cli_for(&dir);
        let host = FakeHost::with_files(vec!["package.json"]);
        let ctx = context(
            "renovate/lodash-4.x",
            "chore(deps): update dependency lodash to v4.17.21",
        );

        let result = generate(&cli, &GenerateArgs::default(), &Config::default(), &host, ctx).unwrap();
        let content = std::fs::read_to_string(&result.files[0]).unwrap();
        assert!(content.contains("\"@octo/widgets-app\": patch"));
    }

    #[test]
    fn test_resolve_context_requires_repo_and_number() {
        let args = GenerateArgs::default();
        let env = EnvContext::default();
        let err = resolve_context(&args, &env).unwrap_err();
        assert!(err.to_string().contains("repository"));

        let args = GenerateArgs {
            repo: Some("octo/widgets".to_string()),
            ..GenerateArgs::default()
        };
        let err = resolve_context(&args, &env).unwrap_err();
        assert!(err.to_string().contains("pull request number"));
    }

    #[test]
    fn test_resolve_context_flag_overrides() {
        let args = GenerateArgs {
            repo: Some("octo/widgets".to_string()),
            pr: Some(77),
            branch: Some("renovate/x-1.x".to_string()),
            ..GenerateArgs::default()
        };
        let env = EnvContext {
            owner: Some("someone".to_string()),
            repo: Some("else".to_string()),
            number: Some(1),
            ..EnvContext::default()
        };

        let ctx = resolve_context(&args, &env).unwrap();
        assert_eq!(ctx.full_repo(), "octo/widgets");
        assert_eq!(ctx.number, 77);
        assert_eq!(ctx.head_branch, "renovate/x-1.x");
    }
}
