// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// renoset - Changeset generator for dependency-update pull requests
///
/// Classifies a Renovate PR's changed files into update types and writes
/// one changeset per type.
#[derive(Parser, Debug)]
#[command(name = "renoset")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Changeset generator for dependency-update pull requests", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to generate if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run the pipeline without writing any files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory containing the repository checkout
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub working_directory: PathBuf,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate changesets from the current pull request (default command)
    Generate(GenerateArgs),

    /// Initialize renoset configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the generate command.
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Branch prefix identifying dependency-update PRs
    #[arg(long, default_value = "renovate/")]
    pub branch_prefix: String,

    /// Post a summary comment on the pull request
    #[arg(long)]
    pub comment_pr: bool,

    /// Path to a configuration file (relative to the working directory)
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Inline JSON or YAML configuration, overriding the file
    #[arg(long)]
    pub config: Option<String>,

    /// Generate even when the head branch lacks the branch prefix
    #[arg(long)]
    pub skip_branch_prefix_check: bool,

    /// Sort dependency names alphabetically in rendered messages
    #[arg(long)]
    pub sort: bool,

    /// API token for the hosting service
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Pull request number (overrides the CI environment)
    #[arg(long)]
    pub pr: Option<u64>,

    /// Repository in owner/name form (overrides the CI environment)
    #[arg(long)]
    pub repo: Option<String>,

    /// PR head branch (overrides the CI environment)
    #[arg(long)]
    pub branch: Option<String>,

    /// PR title (overrides the CI environment)
    #[arg(long)]
    pub title: Option<String>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            branch_prefix: "renovate/".to_string(),
            comment_pr: false,
            config_file: None,
            config: None,
            skip_branch_prefix_check: false,
            sort: false,
            token: None,
            pr: None,
            repo: None,
            branch: None,
            title: None,
        }
    }
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Generate if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Generate(GenerateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let args = Cli::parse_from([
            "renoset",
            "generate",
            "--branch-prefix",
            "deps/",
            "--comment-pr",
            "--sort",
        ]);
        if let Some(Commands::Generate(generate)) = args.command {
            assert_eq!(generate.branch_prefix, "deps/");
            assert!(generate.comment_pr);
            assert!(generate.sort);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_parse_inline_config() {
        let args = Cli::parse_from(["renoset", "generate", "--config", "{\"default_bump\": \"minor\"}"]);
        if let Some(Commands::Generate(generate)) = args.command {
            assert!(generate.config.unwrap().contains("minor"));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["renoset", "--dry-run", "-C", "/tmp/repo", "generate"]);
        assert!(args.dry_run);
        assert_eq!(args.working_directory, PathBuf::from("/tmp/repo"));
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["renoset"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Generate(_)));
    }

    #[test]
    fn test_generate_defaults_match_clap_defaults() {
        let parsed = Cli::parse_from(["renoset", "generate"]);
        let Some(Commands::Generate(from_clap)) = parsed.command else {
            panic!("Expected Generate command");
        };
        let from_default = GenerateArgs::default();
        assert_eq!(from_clap.branch_prefix, from_default.branch_prefix);
        assert_eq!(from_clap.comment_pr, from_default.comment_pr);
        assert_eq!(from_clap.sort, from_default.sort);
    }
}
