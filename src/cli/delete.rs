//! Delete command - remove variables by environment scope family.
//!
//! Each selected scope matches every variable whose scope contains it, so
//! `staging` also removes `staging-eu`. The full list is fetched once and
//! used for the prompt, the plan, and the optional snapshot.

use std::path::PathBuf;

use chrono::Local;
use dialoguer::{Confirm, MultiSelect};
use tracing::info;

use crate::cli::{output, resolve, Globals};
use crate::core::reconcile;
use crate::core::session::Session;
use crate::error::{Result, SyncError};

/// Flags of the delete command.
#[derive(Debug, Default)]
pub struct Options {
    pub scopes: Vec<String>,
    pub snapshot: Option<PathBuf>,
    pub backup: bool,
    pub dry_run: bool,
    pub yes: bool,
}

/// Delete every variable in the selected scope families.
pub fn execute(opts: Options, globals: &Globals) -> Result<()> {
    let target = resolve::target(globals)?;
    let backup = match (opts.snapshot, opts.backup) {
        (Some(file), _) => Some(file),
        (None, true) => Some(resolve::backup_file(
            target.default_path.as_deref(),
            target.project(),
            Local::now(),
        )),
        (None, false) => None,
    };

    let session = Session::open(target.context)?;
    let variables = session.variables()?;

    let selected = if opts.scopes.is_empty() {
        select_scopes(&reconcile::scopes(&variables))?
    } else {
        opts.scopes
    };
    reconcile::check_selection(&selected)?;
    info!(scopes = ?selected, dry_run = opts.dry_run, "running delete");

    let planned = reconcile::plan_delete(&variables, &selected);
    if planned.is_empty() {
        output::dimmed("no variables match");
        return Ok(());
    }

    output::section(&format!(
        "{} to delete",
        output::plural(planned.len(), "variable")
    ));
    for variable in &planned {
        output::list_item(&output::key(&variable.id().to_string()));
    }
    output::blank();

    if opts.dry_run {
        output::warn(&format!(
            "dry run: would delete {}",
            output::plural(planned.len(), "variable")
        ));
        return Ok(());
    }

    if !opts.yes && !confirm(planned.len())? {
        return Err(SyncError::NotConfirmed.into());
    }

    let report = session.delete_from(&variables, &selected, backup.as_deref(), false)?;

    if let Some(path) = &report.snapshot {
        output::success(&format!(
            "saved snapshot to {}",
            output::path(&path.display().to_string())
        ));
    }
    output::success(&format!(
        "deleted {}",
        output::plural(report.deleted.len(), "variable")
    ));
    Ok(())
}

/// Ask which scopes to delete. Non-interactive runs select nothing.
fn select_scopes(available: &[String]) -> Result<Vec<String>> {
    if available.is_empty() || !console::user_attended_stderr() {
        return Ok(Vec::new());
    }

    let chosen = MultiSelect::new()
        .with_prompt("Scopes to delete (space to select, enter to confirm)")
        .items(available)
        .interact()?;

    Ok(chosen.into_iter().map(|i| available[i].clone()).collect())
}

/// Non-interactive runs must pass `--yes`.
fn confirm(count: usize) -> Result<bool> {
    if !console::user_attended_stderr() {
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(format!("Delete {}?", output::plural(count, "variable")))
        .default(false)
        .interact()
        .map_err(Into::into)
}
