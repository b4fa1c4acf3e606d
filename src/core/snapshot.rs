//! Snapshot files.
//!
//! A snapshot is a JSON array of variables, pretty-printed with two-space
//! indentation. There is no envelope or version field.

use std::path::Path;

use tracing::debug;

use crate::core::domain::Variable;
use crate::error::{Result, SnapshotError};

/// Read a snapshot file.
///
/// # Errors
///
/// Returns `SnapshotError::NotFound`, `SnapshotError::Read` or
/// `SnapshotError::Parse`.
pub fn read(path: &Path) -> Result<Vec<Variable>> {
    debug!(path = %path.display(), "reading snapshot");

    if !path.exists() {
        return Err(SnapshotError::NotFound(path.to_path_buf()).into());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let variables: Vec<Variable> =
        serde_json::from_str(&contents).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(count = variables.len(), "snapshot loaded");
    Ok(variables)
}

/// Write a snapshot file, replacing any existing content.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns `SnapshotError::Write` if the file cannot be written.
pub fn write(path: &Path, variables: &[Variable]) -> Result<()> {
    debug!(path = %path.display(), count = variables.len(), "writing snapshot");

    let write_error = |source: std::io::Error| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut contents = serde_json::to_string_pretty(variables)?;
    contents.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, contents).map_err(write_error)?;
    Ok(())
}
