//! Credential configuration.
//!
//! Handles reading, writing, and validating `config.toml`, the list of
//! per-domain access tokens and default snapshot locations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::types::Domain;
use crate::error::{ConfigError, Result};

/// Access token and defaults for one GitLab host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCredential {
    /// Host name, with port when non-default (`gitlab.example.com`)
    pub domain: Domain,
    /// Personal, project, or group access token
    pub token: String,
    /// Default snapshot file or directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<PathBuf>,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: Vec<DomainCredential>,
}

impl Config {
    /// Location of the configuration file.
    ///
    /// An explicit path wins; otherwise `<config dir>/labvars/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no config directory.
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("config not found, using empty credential list");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(credentials = config.credentials.len(), "config loaded");

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating the parent directory.
    ///
    /// The file holds tokens, so it is restricted to the owner on Unix.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteFile)?;
        }
        std::fs::write(path, contents).map_err(ConfigError::WriteFile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(ConfigError::WriteFile)?;
        }

        Ok(())
    }

    /// Validate the credential list.
    ///
    /// Checks:
    /// - Domains are non-empty host names (no scheme, no path)
    /// - Each domain appears once
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        for (i, credential) in self.credentials.iter().enumerate() {
            validate_domain(&credential.domain)?;

            if self.credentials[..i]
                .iter()
                .any(|c| c.domain == credential.domain)
            {
                return Err(ConfigError::InvalidValue {
                    field: "domain",
                    reason: format!("duplicate credential for '{}'", credential.domain),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Credential for an exact host match.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CredentialNotFound` when no entry matches.
    pub fn resolve(&self, host: &str) -> std::result::Result<&DomainCredential, ConfigError> {
        self.credentials
            .iter()
            .find(|c| c.domain == host)
            .ok_or_else(|| ConfigError::CredentialNotFound(host.to_string()))
    }

    /// Insert or replace the credential for its domain.
    ///
    /// Returns `true` if an existing entry was replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the domain is malformed.
    pub fn upsert(&mut self, credential: DomainCredential) -> Result<bool> {
        validate_domain(&credential.domain)?;

        match self
            .credentials
            .iter_mut()
            .find(|c| c.domain == credential.domain)
        {
            Some(existing) => {
                *existing = credential;
                Ok(true)
            }
            None => {
                self.credentials.push(credential);
                Ok(false)
            }
        }
    }

    /// Remove the credential for `domain`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CredentialNotFound` if nothing was removed.
    pub fn remove(&mut self, domain: &str) -> Result<DomainCredential> {
        let index = self
            .credentials
            .iter()
            .position(|c| c.domain == domain)
            .ok_or_else(|| ConfigError::CredentialNotFound(domain.to_string()))?;
        Ok(self.credentials.remove(index))
    }
}

fn validate_domain(domain: &str) -> Result<()> {
    let reason = if domain.trim().is_empty() {
        Some("domain cannot be empty".to_string())
    } else if domain.contains("://") || domain.contains('/') {
        Some(format!("'{}' must be a host name, without scheme or path", domain))
    } else if domain.chars().any(char::is_whitespace) {
        Some(format!("'{}' contains whitespace", domain))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidValue {
            field: "domain",
            reason,
        }
        .into()),
        None => Ok(()),
    }
}
