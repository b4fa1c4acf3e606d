//! Input resolution shared by the remote commands.
//!
//! Everything a run needs (project, token, file) is settled here before any
//! network call is made.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{output, Globals};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::RemoteProjectRef;
use crate::core::git;
use crate::core::session::RunContext;
use crate::error::{Result, SnapshotError};

/// A resolved run target plus the domain's default snapshot location.
#[derive(Debug)]
pub struct Target {
    pub context: RunContext,
    pub default_path: Option<PathBuf>,
}

impl Target {
    pub fn project(&self) -> &RemoteProjectRef {
        &self.context.project
    }
}

/// Folder the git remote is read from.
pub fn repository_dir(globals: &Globals) -> Result<PathBuf> {
    match &globals.dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load the credentials file selected by `--config` or the platform default.
pub fn config(globals: &Globals) -> Result<(Config, PathBuf)> {
    let path = Config::path(globals.config.as_deref())?;
    let config = Config::load(&path)?;
    Ok((config, path))
}

/// Resolve project, token, and default path for a remote command.
///
/// A missing credential is not fatal: a warning is printed and the run
/// continues unauthenticated, so public projects still work.
pub fn target(globals: &Globals) -> Result<Target> {
    let dir = repository_dir(globals)?;
    let project = git::resolve_project(&dir, globals.remote.as_deref())?;
    let (config, _) = config(globals)?;

    let credential = match config.resolve(&project.host) {
        Ok(credential) => Some(credential),
        Err(e) => {
            debug!(host = %project.host, "no credential configured");
            output::warn(&e.to_string());
            None
        }
    };

    let token = select_token(
        std::env::var(constants::TOKEN_ENV).ok(),
        credential.map(|c| c.token.as_str()),
    );
    let default_path = credential.and_then(|c| c.default_path.clone());

    debug!(project = %project, authenticated = !token.is_empty(), "target resolved");
    Ok(Target {
        context: RunContext {
            project,
            token,
        },
        default_path,
    })
}

/// A non-empty environment token wins over the configured one.
fn select_token(env: Option<String>, configured: Option<&str>) -> Zeroizing<String> {
    match env.filter(|t| !t.is_empty()) {
        Some(token) => Zeroizing::new(token),
        None => Zeroizing::new(configured.unwrap_or_default().to_string()),
    }
}

/// The snapshot file for pull or push.
///
/// An explicit file wins. Otherwise the domain's default path is used; when
/// it names a directory the file is `<project>.variables.json` inside it.
///
/// # Errors
///
/// Returns `SnapshotError::NotSelected` when neither is available.
pub fn snapshot_file(
    explicit: Option<PathBuf>,
    default_path: Option<&Path>,
    project: &RemoteProjectRef,
) -> Result<PathBuf> {
    if let Some(file) = explicit {
        return Ok(file);
    }
    match default_path {
        Some(path) if path.is_dir() => {
            Ok(path.join(format!("{}{}", project.name(), constants::SNAPSHOT_SUFFIX)))
        }
        Some(path) => Ok(path.to_path_buf()),
        None => Err(SnapshotError::NotSelected.into()),
    }
}

/// Timestamped pre-delete snapshot path.
///
/// Placed in the default directory when there is one, otherwise in the
/// current directory.
pub fn backup_file(
    default_path: Option<&Path>,
    project: &RemoteProjectRef,
    now: DateTime<Local>,
) -> PathBuf {
    let dir = match default_path {
        Some(path) if path.is_dir() => path.to_path_buf(),
        Some(path) => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        None => PathBuf::new(),
    };
    dir.join(format!(
        "{}.{}{}",
        project.name(),
        now.format("%Y%m%dT%H%M%S"),
        constants::SNAPSHOT_SUFFIX
    ))
}
