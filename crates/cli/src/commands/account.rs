// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account commands: login, register, logout, whoami

use super::Session;
use crate::error::DashError;
use clap::Args;
use pipedash_core::{auth, AuthGate};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct RegisterArgs {
    /// Repeat of --password (read from stdin when omitted)
    #[arg(long, env = "PIPEDASH_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: Option<String>,
}

fn require_username(username: Option<String>) -> Result<String, DashError> {
    username.ok_or_else(|| {
        DashError::new("no username given")
            .with_suggestion("Pass --username NAME or set PIPEDASH_USERNAME")
    })
}

/// Use the given value, or read one line from stdin
async fn value_or_stdin(value: Option<String>, prompt: &str) -> Result<String, DashError> {
    if let Some(value) = value {
        return Ok(value);
    }
    eprint!("{}: ", prompt);
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| DashError::new(format!("could not read {}", prompt)).with_source(e))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    session: &Session,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = require_username(username)?;
    let password = value_or_stdin(password, "Password").await?;
    session.sign_in(&username, &password).await?;
    println!("Logged in as {}", username);
    Ok(())
}

pub async fn register(
    session: &Session,
    username: Option<String>,
    password: Option<String>,
    args: RegisterArgs,
) -> anyhow::Result<()> {
    let username = require_username(username)?;
    let password = value_or_stdin(password, "Password").await?;
    let confirm = value_or_stdin(args.confirm_password, "Confirm password").await?;

    auth::register(&session.api, &username, &password, &confirm)
        .await
        .map_err(DashError::from)?;
    println!("Registration successful! You can now log in as {}.", username);
    Ok(())
}

pub async fn logout(session: &Session) -> anyhow::Result<()> {
    auth::logout(&session.api).await.map_err(DashError::from)?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(session: &Session) -> anyhow::Result<()> {
    let user = AuthGate::whoami(&session.api)
        .await
        .map_err(DashError::from)?;
    println!("{}", user.username);
    Ok(())
}
