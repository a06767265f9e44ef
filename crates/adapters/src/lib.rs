// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Backend adapters for the pipeline dashboard

pub mod http;
pub mod traced;

pub use http::{HttpDashboardApi, HttpSetupError};
pub use traced::TracedDashboardApi;
