// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job history listing

use super::catalog::ListArgs;
use super::Session;
use crate::error::DashError;
use crate::output::{print, OutputFormat};
use pipedash_core::JobHistory;

pub async fn history(session: &Session, args: ListArgs) -> anyhow::Result<()> {
    session.require_auth().await?;
    let history = JobHistory::load(&session.api).await.map_err(DashError::from)?;
    print(&history, OutputFormat::from_json_flag(args.json));
    Ok(())
}
