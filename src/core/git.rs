//! Local repository metadata.
//!
//! Shells out to `git` to read the origin remote of a working tree.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::core::domain::RemoteProjectRef;
use crate::error::{GitError, Result};

/// Origin remote URL of the repository at `dir`.
///
/// # Errors
///
/// Returns `GitError::GitNotFound` if git is not installed, or
/// `GitError::NotAGitRepository` if `dir` has no `origin` remote.
pub fn remote_origin(dir: &Path) -> Result<String> {
    let git = which::which("git").map_err(|_| GitError::GitNotFound)?;

    debug!(dir = %dir.display(), "reading origin remote");
    let output = Command::new(git)
        .args(["remote", "get-url", "origin"])
        .current_dir(dir)
        .output()
        .map_err(|_| GitError::NotAGitRepository(dir.to_path_buf()))?;

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || url.is_empty() {
        debug!(
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git remote lookup failed"
        );
        return Err(GitError::NotAGitRepository(dir.to_path_buf()).into());
    }

    Ok(url)
}

/// Resolve the GitLab project for a repository.
///
/// An explicit remote URL skips the git lookup.
///
/// # Errors
///
/// Returns `GitError` if the remote cannot be read or parsed.
pub fn resolve_project(dir: &Path, remote: Option<&str>) -> Result<RemoteProjectRef> {
    let url = match remote {
        Some(url) => url.to_string(),
        None => remote_origin(dir)?,
    };
    let project = RemoteProjectRef::parse(&url)?;
    debug!(host = %project.host, path = %project.path, "resolved remote project");
    Ok(project)
}
