//! Constants used throughout labvars.
//!
//! Centralizes magic strings and configuration values.

/// Directory under the platform config dir (`~/.config/labvars`).
pub const CONFIG_DIR: &str = "labvars";

/// Credential configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the token for a single run.
pub const TOKEN_ENV: &str = "LABVARS_TOKEN";

/// Authentication header sent on every API call.
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Query parameter selecting one scope variant of a variable.
pub const SCOPE_FILTER: &str = "filter[environment_scope]";

/// GitLab's scope for variables available to every environment.
pub const DEFAULT_SCOPE: &str = "*";

/// Suffix for snapshot files named after the project.
pub const SNAPSHOT_SUFFIX: &str = ".variables.json";

/// User-Agent for API requests.
pub const USER_AGENT: &str = concat!("labvars/", env!("CARGO_PKG_VERSION"));
