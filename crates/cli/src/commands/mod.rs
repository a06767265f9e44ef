// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod account;
pub mod catalog;
pub mod jobs;
pub mod submit;

use crate::error::DashError;
use pipedash_adapters::{HttpDashboardApi, TracedDashboardApi};
use pipedash_core::DashboardConfig;
use std::path::Path;

/// Backend client used by every command
pub type Api = TracedDashboardApi<HttpDashboardApi>;

/// Config file, then environment, then `--url`
pub fn resolve_config(path: Option<&Path>, url: Option<&str>) -> Result<DashboardConfig, DashError> {
    let config = DashboardConfig::resolve(path, url)?;
    tracing::debug!(
        base_url = %config.base_url,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        submission_mode = config.submission_mode,
        "config resolved"
    );
    Ok(config)
}

/// One process-lifetime connection to the backend
pub struct Session {
    pub config: DashboardConfig,
    pub api: Api,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Result<Self, DashError> {
        let api = TracedDashboardApi::new(HttpDashboardApi::from_config(&config)?);
        Ok(Self { config, api })
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), DashError> {
        pipedash_core::auth::login(&self.api, username, password).await?;
        Ok(())
    }

    /// Fail with a login hint unless the session is authenticated
    pub async fn require_auth(&self) -> Result<(), DashError> {
        pipedash_core::AuthGate::require(&self.api).await?;
        Ok(())
    }
}
