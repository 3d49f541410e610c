//! Tracker configuration.
//!
//! Everything is optional; a missing `config.toml` yields the defaults,
//! which point at `NixOS/nixpkgs` on github.com:
//!
//! ```toml
//! concurrency = 4
//!
//! [upstream]
//! owner = "NixOS"
//! repo = "nixpkgs"
//! api-base-uri = "https://api.github.com"
//!
//! [branches]
//! unstable-targets = ["master", "staging-next"]
//! unstable = ["nixpkgs-unstable", "nixos-unstable", "nixos-unstable-small"]
//! release = ["nixos-25.05", "nixos-25.05-small", "nixpkgs-25.05-darwin"]
//! ```

mod error;

pub use error::ConfigError;

use crate::branches::BranchTable;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Default number of tracked pull requests refreshed at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Repository whose pull requests are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UpstreamConfig {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// REST API root.
    pub api_base_uri: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            owner: "NixOS".to_string(),
            repo: "nixpkgs".to_string(),
            api_base_uri: "https://api.github.com".to_string(),
        }
    }
}

/// Parsed `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrackerConfig {
    /// Maximum tracked pull requests resolved concurrently.
    pub concurrency: usize,

    /// Upstream repository.
    pub upstream: UpstreamConfig,

    /// Target ref to channel branch table.
    pub branches: BranchTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            upstream: UpstreamConfig::default(),
            branches: BranchTable::default(),
        }
    }
}

impl TrackerConfig {
    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read,
    /// parsed or validated.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match load_config(path)? {
            Some(config) => Ok(config),
            None => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1".to_string()));
        }
        if self.upstream.owner.trim().is_empty() || self.upstream.repo.trim().is_empty() {
            return Err(invalid("upstream owner and repo must not be empty".to_string()));
        }
        Url::parse(&self.upstream.api_base_uri).map_err(|e| {
            invalid(format!(
                "api-base-uri '{}' is not a valid URL: {e}",
                self.upstream.api_base_uri
            ))
        })?;

        for (key, list) in [
            ("unstable-targets", &self.branches.unstable_targets),
            ("unstable", &self.branches.unstable),
            ("release", &self.branches.release),
        ] {
            if list.is_empty() {
                return Err(invalid(format!("branches.{key} must not be empty")));
            }
        }

        Ok(())
    }
}

/// Loads and validates `config.toml`.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
pub fn load_config(path: &Path) -> Result<Option<TrackerConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let config: TrackerConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })?;
    config.validate(path)?;

    info!(
        path = %path.display(),
        owner = %config.upstream.owner,
        repo = %config.upstream.repo,
        "Loaded config"
    );
    Ok(Some(config))
}
