//! Project reference types.
//!
//! Maps a git remote URL onto the GitLab instance and project path it
//! points at, and holds the numeric project id the API resolves it to.

use serde::Deserialize;

use crate::core::types::Domain;
use crate::error::GitError;

/// Numeric GitLab project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// GitLab project addressed by a git remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProjectRef {
    /// Scheme and host of the API (e.g. `https://gitlab.example.com`)
    pub base_url: String,
    /// Host used for credential lookup, port included when present
    pub host: Domain,
    /// Project path without leading slash or `.git` suffix
    pub path: String,
}

impl RemoteProjectRef {
    /// Parse a git remote URL.
    ///
    /// Accepts `http(s)://[user@]host[:port]/path[.git]`,
    /// `ssh://[user@]host[:port]/path[.git]` and scp-like
    /// `user@host:path[.git]`. SSH remotes map to `https://host`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidRemote` for local paths, unknown schemes,
    /// or URLs without a host or project path.
    pub fn parse(remote: &str) -> Result<Self, GitError> {
        let remote = remote.trim();
        let invalid = || GitError::InvalidRemote(remote.to_string());

        let (scheme, authority, path) = match remote.split_once("://") {
            Some((scheme, rest)) => {
                let (authority, path) = rest.split_once('/').ok_or_else(invalid)?;
                (scheme, authority, path)
            }
            None => {
                let (authority, path) = remote.split_once(':').ok_or_else(invalid)?;
                if !authority.contains('@') {
                    return Err(invalid());
                }
                ("ssh", authority, path)
            }
        };

        // Drop userinfo (`git@`, `user:token@`)
        let authority = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host);

        let (base_url, host) = match scheme {
            "http" | "https" => (format!("{}://{}", scheme, authority), authority.to_string()),
            "ssh" | "git+ssh" => {
                let host = authority.split(':').next().unwrap_or(authority);
                (format!("https://{}", host), host.to_string())
            }
            _ => return Err(invalid()),
        };

        if host.is_empty() {
            return Err(invalid());
        }

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        if path.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            base_url,
            host,
            path: path.to_string(),
        })
    }

    /// Last path segment (the project slug).
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl std::fmt::Display for RemoteProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base_url, self.path)
    }
}
