// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the renoset application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for renoset operations.
#[derive(Error, Debug)]
pub enum RenosetError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // GitHub API errors
    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    // Rendering/writing errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Missing pull request context
    #[error("Missing pull request context: {0}")]
    MissingContext(String),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Update type '{name}' has no file patterns")]
    EmptyPatterns { name: String },

    #[error("Invalid glob pattern '{pattern}' in '{name}': {message}")]
    InvalidPattern {
        name: String,
        pattern: String,
        message: String,
    },
}

/// GitHub API errors.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("GitHub API returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Failed to parse API response: {message}")]
    Parse { message: String },

    #[error("No API token available; pass --token or set GITHUB_TOKEN")]
    MissingToken,
}

/// Changeset rendering and writing errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render template for '{update_type}': {message}")]
    Template {
        update_type: String,
        message: String,
    },

    #[error("Failed to write changeset {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Result type alias for renoset operations.
pub type Result<T> = std::result::Result<T, RenosetError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| RenosetError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
