//! Credentials rm command.

use tracing::info;

use crate::cli::{output, resolve, Globals};
use crate::error::Result;

/// Remove the token for `domain`.
pub fn execute(domain: &str, globals: &Globals) -> Result<()> {
    let (mut config, path) = resolve::config(globals)?;
    config.remove(domain)?;
    config.save(&path)?;
    info!(domain, "removed credential");

    output::success(&format!("removed credential for {}", output::key(domain)));
    Ok(())
}
