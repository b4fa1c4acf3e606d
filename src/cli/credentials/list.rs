//! Credentials list command.

use crate::cli::credentials::mask;
use crate::cli::{output, resolve, Globals};
use crate::error::Result;

/// List configured domains with masked tokens.
pub fn execute(json: bool, globals: &Globals) -> Result<()> {
    let (config, _) = resolve::config(globals)?;
    let credentials = &config.credentials;

    if json {
        let entries: Vec<_> = credentials
            .iter()
            .map(|c| {
                serde_json::json!({
                    "domain": c.domain,
                    "token": mask(&c.token),
                    "default_path": c.default_path,
                })
            })
            .collect();
        let result = serde_json::json!({
            "credentials": entries,
            "count": credentials.len()
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if credentials.is_empty() {
        output::dimmed("no credentials configured");
    } else {
        output::section(&output::plural(credentials.len(), "credential"));
        for credential in credentials {
            match &credential.default_path {
                Some(path) => output::kv(
                    &credential.domain,
                    format!("{}  {}", mask(&credential.token), path.display()),
                ),
                None => output::kv(&credential.domain, mask(&credential.token)),
            }
        }
    }

    Ok(())
}
