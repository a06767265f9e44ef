// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard configuration
//!
//! Resolved in order: built-in defaults, then `pipedash.toml` (or an explicit
//! path), then `PIPEDASH_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "pipedash.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("poll interval must be greater than zero")]
    InvalidInterval,
    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Backend root, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    /// Time between status polls for each tracked job
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Require a submission as well as a pipeline before upload
    pub submission_mode: bool,
    /// Per-request deadline; none means the HTTP client's default
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            submission_mode: true,
            request_timeout: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or from [`CONFIG_FILE`] if it exists.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_toml(&text, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Apply `PIPEDASH_URL`, `PIPEDASH_POLL_INTERVAL_MS` and
    /// `PIPEDASH_SUBMISSION_MODE` from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("PIPEDASH_URL") {
            self.base_url = url;
        }

        if let Some(raw) = lookup("PIPEDASH_POLL_INTERVAL_MS") {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PIPEDASH_POLL_INTERVAL_MS",
                value: raw.clone(),
            })?;
            self.poll_interval = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup("PIPEDASH_SUBMISSION_MODE") {
            self.submission_mode = parse_flag(&raw).ok_or(ConfigError::InvalidEnv {
                var: "PIPEDASH_SUBMISSION_MODE",
                value: raw.clone(),
            })?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidInterval);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// File, then environment, then an explicit URL; validated once at the
    /// end so a later layer can replace a bad earlier value
    pub fn resolve(path: Option<&Path>, base_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?.with_env()?;
        if let Some(url) = base_url {
            config.base_url = url.to_string();
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
