//! Reconciliation between a snapshot and the remote store.
//!
//! Push upserts each variable by `(key, environment_scope)`. Delete removes
//! every variable whose scope belongs to a selected scope family. Both run
//! strictly in order and stop at the first failure; nothing is rolled back.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::core::domain::{DeleteReport, ProjectId, PushReport, Variable, VariableId};
use crate::core::remote::Remote;
use crate::error::{Result, SyncError};

/// Create or update every variable, in order.
///
/// Each variable is probed by key and scope: absent variables are created
/// with POST, present ones are overwritten with PUT. Values are not
/// compared, so an unchanged variable is still updated.
///
/// # Errors
///
/// Returns `SyncError::PushFailed` naming the first variable whose probe or
/// write fails. Variables after it are not attempted.
pub fn push<R: Remote + ?Sized>(
    remote: &R,
    project: ProjectId,
    variables: &[Variable],
) -> Result<PushReport> {
    let mut report = PushReport::default();

    for variable in variables {
        let failed = |e: crate::error::Error| SyncError::PushFailed {
            key: variable.key.clone(),
            reason: e.to_string(),
        };

        let existing = remote
            .find_variable(project, &variable.key, &variable.environment_scope)
            .map_err(failed)?;

        if existing.is_some() {
            remote.update_variable(project, variable).map_err(failed)?;
            debug!(variable = %variable.id(), "updated");
            report.updated.push(variable.id());
        } else {
            remote.create_variable(project, variable).map_err(failed)?;
            debug!(variable = %variable.id(), "created");
            report.created.push(variable.id());
        }
    }

    info!(
        created = report.created.len(),
        updated = report.updated.len(),
        "push complete"
    );
    Ok(report)
}

/// `(key, scope)` pairs that appear more than once, in order of second appearance.
pub fn duplicates(variables: &[Variable]) -> Vec<VariableId> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();

    for variable in variables {
        let id = variable.id();
        if !seen.insert(id.clone()) && !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    repeated
}

/// Distinct environment scopes, in order of first appearance.
pub fn scopes(variables: &[Variable]) -> Vec<String> {
    let mut seen = HashSet::new();
    variables
        .iter()
        .filter(|v| seen.insert(v.environment_scope.as_str()))
        .map(|v| v.environment_scope.clone())
        .collect()
}

/// Scope family match: `scope` contains `selected` as a substring.
///
/// Selecting `prod` matches `prod`, `prod/eu`, and also `staging-prod`.
/// A blank selection matches nothing.
pub fn matches_scope_family(scope: &str, selected: &str) -> bool {
    !selected.trim().is_empty() && scope.contains(selected)
}

/// Check a scope selection before deleting.
///
/// # Errors
///
/// Returns `SyncError::NoScopesSelected` if `selected` is empty or holds a
/// blank scope.
pub fn check_selection<S: AsRef<str>>(selected: &[S]) -> Result<()> {
    if selected.is_empty() || selected.iter().any(|s| s.as_ref().trim().is_empty()) {
        return Err(SyncError::NoScopesSelected.into());
    }
    Ok(())
}

/// Variables a scoped delete would remove, in list order.
pub fn plan_delete<'a, S: AsRef<str>>(
    variables: &'a [Variable],
    selected: &[S],
) -> Vec<&'a Variable> {
    variables
        .iter()
        .filter(|v| {
            selected
                .iter()
                .any(|s| matches_scope_family(&v.environment_scope, s.as_ref()))
        })
        .collect()
}

/// Delete every variable whose scope matches a selected scope family.
///
/// # Errors
///
/// Returns `SyncError::NoScopesSelected` if `selected` is empty or holds a
/// blank scope, or `SyncError::DeleteFailed` for the first deletion that
/// fails. Deletions already made are kept.
pub fn delete_scoped<R: Remote + ?Sized, S: AsRef<str>>(
    remote: &R,
    project: ProjectId,
    variables: &[Variable],
    selected: &[S],
) -> Result<DeleteReport> {
    check_selection(selected)?;

    let mut report = DeleteReport::default();
    for variable in plan_delete(variables, selected) {
        remote
            .delete_variable(project, &variable.key, &variable.environment_scope)
            .map_err(|e| SyncError::DeleteFailed {
                key: variable.key.clone(),
                scope: variable.environment_scope.clone(),
                reason: e.to_string(),
            })?;
        debug!(variable = %variable.id(), "deleted");
        report.deleted.push(variable.id());
    }

    info!(deleted = report.deleted.len(), "delete complete");
    Ok(report)
}
