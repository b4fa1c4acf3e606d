//! Results returned by sync operations.

use std::path::PathBuf;

use super::VariableId;

/// Result of a pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReport {
    /// Number of variables written
    pub count: usize,
    /// Snapshot file that was written
    pub path: PathBuf,
}

/// Result of a push, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Variables created with POST
    pub created: Vec<VariableId>,
    /// Variables overwritten with PUT
    pub updated: Vec<VariableId>,
}

impl PushReport {
    /// Total number of variables reconciled.
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

/// Result of a scoped delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Variables deleted (or that would be, on a dry run)
    pub deleted: Vec<VariableId>,
    /// Pre-delete snapshot, if one was written
    pub snapshot: Option<PathBuf>,
    /// Whether deletions were skipped
    pub dry_run: bool,
}
