//! Error types.
//!
//! Each concern has its own error enum; [`Error`] wraps them so command
//! handlers can propagate any failure with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for a labvars run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credential configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("private token not found for domain: {0}")]
    CredentialNotFound(String),

    #[error("unable to determine config directory")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Local repository errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("not a git repository with an origin remote: {}", .0.display())]
    NotAGitRepository(PathBuf),

    #[error("git executable not found in PATH")]
    GitNotFound,

    #[error("unsupported remote url: {0}")]
    InvalidRemote(String),
}

/// GitLab API errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to retrieve project {path}: {reason}")]
    ProjectNotFound { path: String, reason: String },

    #[error("error fetching CI/CD variables from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{method} {url} failed: {reason}")]
    Request {
        method: &'static str,
        url: String,
        reason: String,
    },

    #[error("invalid GitLab url: {0}")]
    InvalidUrl(String),

    #[error("failed to build http client: {0}")]
    Client(String),
}

/// Snapshot file errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("no file selected")]
    NotSelected,

    #[error("snapshot file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reconciliation errors. Each one ends the run at the failing variable.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to push variable '{key}': {reason}")]
    PushFailed { key: String, reason: String },

    #[error("failed to delete variable '{key}' (scope {scope}): {reason}")]
    DeleteFailed {
        key: String,
        scope: String,
        reason: String,
    },

    #[error("no environment scopes selected")]
    NoScopesSelected,

    #[error("deletion not confirmed")]
    NotConfirmed,
}

pub type Result<T> = std::result::Result<T, Error>;
