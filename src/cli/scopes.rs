//! Scopes command - list environment scopes in use.

use crate::cli::{output, resolve, Globals};
use crate::core::session::Session;
use crate::error::Result;

/// Print the distinct environment scopes of the project's variables.
pub fn execute(json: bool, globals: &Globals) -> Result<()> {
    let target = resolve::target(globals)?;
    let session = Session::open(target.context)?;
    let scopes = session.scopes()?;

    if json {
        let result = serde_json::json!({
            "project": session.project().path,
            "scopes": scopes,
            "count": scopes.len()
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if scopes.is_empty() {
        output::dimmed("no variables");
    } else {
        output::section(&output::plural(scopes.len(), "scope"));
        for scope in &scopes {
            output::list_item(scope);
        }
    }

    Ok(())
}
