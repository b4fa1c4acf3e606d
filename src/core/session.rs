//! Per-run orchestration.
//!
//! A [`Session`] is opened for one repository and one action. Opening it
//! resolves the project id; each operation then runs to completion or to
//! the first error. All inputs (files, selected scopes) arrive already
//! resolved, so nothing here prompts.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::core::domain::{
    DeleteReport, ProjectId, PullReport, PushReport, RemoteProjectRef, Variable,
};
use crate::core::reconcile;
use crate::core::remote::{GitLab, Remote};
use crate::core::snapshot;
use crate::error::Result;

/// Explicit state for one run: which project, which token.
pub struct RunContext {
    pub project: RemoteProjectRef,
    pub token: Zeroizing<String>,
}

impl RunContext {
    pub fn new(project: RemoteProjectRef, token: impl Into<String>) -> Self {
        Self {
            project,
            token: Zeroizing::new(token.into()),
        }
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("project", &self.project)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A resolved project and the remote to sync it with.
#[derive(Debug)]
pub struct Session<R: Remote = GitLab> {
    remote: R,
    project: RemoteProjectRef,
    project_id: ProjectId,
}

impl Session<GitLab> {
    /// Connect to GitLab and resolve the project id.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::ProjectNotFound` if the project cannot be
    /// resolved for any reason.
    pub fn open(context: RunContext) -> Result<Self> {
        let gitlab = GitLab::new(&context.project.base_url, &context.token)?;
        let project_id = gitlab.project_id(&context.project)?;
        info!(project = %context.project, id = %project_id, "project resolved");
        Ok(Self::with_remote(gitlab, context.project, project_id))
    }
}

impl<R: Remote> Session<R> {
    /// Session over an already-resolved project.
    pub fn with_remote(remote: R, project: RemoteProjectRef, project_id: ProjectId) -> Self {
        Self {
            remote,
            project,
            project_id,
        }
    }

    pub fn project(&self) -> &RemoteProjectRef {
        &self.project
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Every remote variable, in server order.
    pub fn variables(&self) -> Result<Vec<Variable>> {
        self.remote.list_variables(self.project_id)
    }

    /// Export every variable to `dest`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Fetch` or `SnapshotError::Write`. Nothing is
    /// written if fetching fails.
    pub fn pull(&self, dest: &Path) -> Result<PullReport> {
        let variables = self.variables()?;
        snapshot::write(dest, &variables)?;
        info!(count = variables.len(), path = %dest.display(), "pulled variables");
        Ok(PullReport {
            count: variables.len(),
            path: dest.to_path_buf(),
        })
    }

    /// Create or update every variable in `src`, in file order.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the file cannot be read, or
    /// `SyncError::PushFailed` for the first failing variable.
    pub fn push(&self, src: &Path) -> Result<PushReport> {
        let variables = snapshot::read(src)?;
        for id in reconcile::duplicates(&variables) {
            warn!(variable = %id, "appears more than once in snapshot, last one wins");
        }
        reconcile::push(&self.remote, self.project_id, &variables)
    }

    /// Distinct environment scopes currently on the remote.
    pub fn scopes(&self) -> Result<Vec<String>> {
        Ok(reconcile::scopes(&self.variables()?))
    }

    /// Fetch, then delete every variable in the selected scope families.
    ///
    /// # Errors
    ///
    /// See [`Session::delete_from`].
    pub fn delete<S: AsRef<str>>(
        &self,
        selected: &[S],
        backup: Option<&Path>,
        dry_run: bool,
    ) -> Result<DeleteReport> {
        let variables = self.variables()?;
        self.delete_from(&variables, selected, backup, dry_run)
    }

    /// Delete from an already-fetched variable list.
    ///
    /// When `backup` is given, the full list is written there first. A
    /// dry run reports the matching variables without deleting.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::NoScopesSelected` (nothing, or a blank scope,
    /// selected), `SnapshotError::Write`, or
    /// `SyncError::DeleteFailed` for the first failing deletion.
    pub fn delete_from<S: AsRef<str>>(
        &self,
        variables: &[Variable],
        selected: &[S],
        backup: Option<&Path>,
        dry_run: bool,
    ) -> Result<DeleteReport> {
        reconcile::check_selection(selected)?;

        let backup: Option<PathBuf> = match backup {
            Some(path) => {
                snapshot::write(path, variables)?;
                info!(path = %path.display(), "wrote pre-delete snapshot");
                Some(path.to_path_buf())
            }
            None => None,
        };

        let mut report = if dry_run {
            DeleteReport {
                deleted: reconcile::plan_delete(variables, selected)
                    .into_iter()
                    .map(Variable::id)
                    .collect(),
                dry_run: true,
                ..DeleteReport::default()
            }
        } else {
            reconcile::delete_scoped(&self.remote, self.project_id, variables, selected)?
        };
        report.snapshot = backup;
        Ok(report)
    }
}
