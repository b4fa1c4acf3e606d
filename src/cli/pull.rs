//! Pull command - export every project variable to a JSON file.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, resolve, Globals};
use crate::core::session::Session;
use crate::error::Result;

/// Export all variables of the current repository's project.
pub fn execute(file: Option<PathBuf>, globals: &Globals) -> Result<()> {
    let target = resolve::target(globals)?;
    let dest = resolve::snapshot_file(file, target.default_path.as_deref(), target.project())?;
    info!(project = %target.project(), dest = %dest.display(), "running pull");

    let session = Session::open(target.context)?;
    let report = session.pull(&dest)?;

    output::success(&format!(
        "pulled {} to {}",
        output::plural(report.count, "variable"),
        output::path(&report.path.display().to_string())
    ));
    Ok(())
}
