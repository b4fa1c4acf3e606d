//! Push command - create or update project variables from a JSON file.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, resolve, Globals};
use crate::core::session::Session;
use crate::error::{Result, SnapshotError};

/// Upsert every variable in the snapshot file, in file order.
pub fn execute(file: Option<PathBuf>, globals: &Globals) -> Result<()> {
    let target = resolve::target(globals)?;
    let src = resolve::snapshot_file(file, target.default_path.as_deref(), target.project())?;

    // Fail before touching the network.
    if !src.is_file() {
        return Err(SnapshotError::NotFound(src).into());
    }
    info!(project = %target.project(), src = %src.display(), "running push");

    let session = Session::open(target.context)?;
    let report = session.push(&src)?;

    for id in &report.created {
        output::list_item(&format!("created {}", output::key(&id.to_string())));
    }
    for id in &report.updated {
        output::list_item(&format!("updated {}", output::key(&id.to_string())));
    }
    output::success(&format!(
        "pushed {} ({} created, {} updated)",
        output::plural(report.total(), "variable"),
        report.created.len(),
        report.updated.len()
    ));
    Ok(())
}
