// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session checks and account calls
//!
//! The backend keeps the session in a cookie; nothing here stores
//! credentials. Server error text is passed through unchanged.

use crate::api::{ApiError, Credentials, DashboardApi, Registration, UserInfo};
use crate::error::AuthError;

/// Guard for pages that need a signed-in user
pub struct AuthGate;

impl AuthGate {
    /// Succeeds only when the backend reports an authenticated session
    pub async fn require<A: DashboardApi>(api: &A) -> Result<(), AuthError> {
        match api.check_auth().await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::info!("session not authenticated");
                Err(AuthError::NotAuthenticated)
            }
            Err(err) => Err(session_error(err)),
        }
    }

    /// The signed-in user, or `NotAuthenticated`
    pub async fn whoami<A: DashboardApi>(api: &A) -> Result<UserInfo, AuthError> {
        api.current_user().await.map_err(session_error)
    }
}

fn session_error(err: ApiError) -> AuthError {
    match err {
        e if e.is_unauthorized() => AuthError::NotAuthenticated,
        ApiError::Network(detail) => {
            tracing::warn!(error = %detail, "session check failed");
            AuthError::Unreachable(detail)
        }
        other => AuthError::Rejected(other.to_string()),
    }
}

fn form_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Rejected { message, .. } => AuthError::Rejected(message),
        ApiError::Network(detail) => AuthError::Unreachable(detail),
        ApiError::Decode(detail) => AuthError::Rejected(detail),
    }
}

pub async fn login<A: DashboardApi>(
    api: &A,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    api.login(&credentials).await.map_err(form_error)?;
    tracing::info!(username, "logged in");
    Ok(())
}

/// Create an account. Mismatched passwords are caught before any request.
pub async fn register<A: DashboardApi>(
    api: &A,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    if password != confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    let registration = Registration {
        username: username.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
    };
    api.register(&registration).await.map_err(form_error)?;
    tracing::info!(username, "registered");
    Ok(())
}

pub async fn logout<A: DashboardApi>(api: &A) -> Result<(), AuthError> {
    api.logout().await.map_err(form_error)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
