//! Credentials add command.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, resolve, Globals};
use crate::core::config::DomainCredential;
use crate::error::Result;

/// Add or replace the token for `domain`.
pub fn execute(
    domain: &str,
    token: &str,
    default_path: Option<PathBuf>,
    globals: &Globals,
) -> Result<()> {
    let (mut config, path) = resolve::config(globals)?;

    let replaced = config.upsert(DomainCredential {
        domain: domain.to_string(),
        token: token.to_string(),
        default_path,
    })?;
    config.save(&path)?;
    info!(domain, replaced, config = %path.display(), "saved credential");

    let verb = if replaced { "updated" } else { "added" };
    output::success(&format!("{} credential for {}", verb, output::key(domain)));
    Ok(())
}
