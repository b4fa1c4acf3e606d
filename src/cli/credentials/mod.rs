//! Credential management commands.
//!
//! Tokens live in `config.toml`, one entry per GitLab host.

mod add;
mod list;
mod rm;

pub use add::execute as add;
pub use list::execute as list;
pub use rm::execute as rm;

/// Show only the first characters of a token.
pub(crate) fn mask(token: &str) -> String {
    const VISIBLE: usize = 4;
    if token.chars().count() <= VISIBLE * 2 {
        return "****".to_string();
    }
    let head: String = token.chars().take(VISIBLE).collect();
    format!("{}****", head)
}
