//! Remote variable store.
//!
//! The [`Remote`] trait is the seam between reconciliation logic and the
//! GitLab API, so the same push and delete code runs against the real
//! client or an in-memory store in tests.
//!
//! All calls are blocking and issued one at a time.

mod gitlab;
pub mod memory;
pub mod pagination;

pub use gitlab::GitLab;
pub use memory::Memory;

use crate::core::domain::{ProjectId, Variable};
use crate::error::Result;

/// Project-level CI/CD variable operations.
pub trait Remote {
    /// Every variable of the project, following pagination to the end.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Fetch` if any page fails.
    fn list_variables(&self, project: ProjectId) -> Result<Vec<Variable>>;

    /// Look up one `(key, scope)` variant.
    ///
    /// Returns `None` on 404. This is the only call that tells "absent"
    /// apart from other failures.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Request` for any other failed request.
    fn find_variable(&self, project: ProjectId, key: &str, scope: &str)
        -> Result<Option<Variable>>;

    /// Create a variable from its full body.
    fn create_variable(&self, project: ProjectId, variable: &Variable) -> Result<()>;

    /// Overwrite the variant matching the variable's key and scope.
    fn update_variable(&self, project: ProjectId, variable: &Variable) -> Result<()>;

    /// Delete one `(key, scope)` variant.
    fn delete_variable(&self, project: ProjectId, key: &str, scope: &str) -> Result<()>;
}

impl<R: Remote + ?Sized> Remote for &R {
    fn list_variables(&self, project: ProjectId) -> Result<Vec<Variable>> {
        (**self).list_variables(project)
    }

    fn find_variable(
        &self,
        project: ProjectId,
        key: &str,
        scope: &str,
    ) -> Result<Option<Variable>> {
        (**self).find_variable(project, key, scope)
    }

    fn create_variable(&self, project: ProjectId, variable: &Variable) -> Result<()> {
        (**self).create_variable(project, variable)
    }

    fn update_variable(&self, project: ProjectId, variable: &Variable) -> Result<()> {
        (**self).update_variable(project, variable)
    }

    fn delete_variable(&self, project: ProjectId, key: &str, scope: &str) -> Result<()> {
        (**self).delete_variable(project, key, scope)
    }
}
