// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event routing
//!
//! - `EventBus` - delivers events to subscribers whose patterns match
//! - `EventPattern` - `job:*` style matching on event names

mod bus;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use subscription::{EventPattern, SubscriberId, Subscription};
