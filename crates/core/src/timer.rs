// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeating poll timer handle
//!
//! Tracks whether a tracker's poll timer may still fire. Cancellation is
//! permanent: once cancelled the timer is inert and cannot be re-armed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not yet armed
    Idle,
    Armed { since: Instant },
    Cancelled,
}

/// Handle for a fixed-interval repeating timer
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    state: TimerState,
    fired: u64,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: TimerState::Idle,
            fired: 0,
        }
    }

    /// Arm an idle timer. Returns false if it was already armed or cancelled.
    pub fn arm(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Armed { since: now };
                true
            }
            TimerState::Armed { .. } | TimerState::Cancelled => false,
        }
    }

    /// Cancel for good. Returns true only for the call that did the cancelling.
    pub fn cancel(&mut self) -> bool {
        let was_cancelled = self.state == TimerState::Cancelled;
        self.state = TimerState::Cancelled;
        !was_cancelled
    }

    /// Count a tick that issued a poll
    pub fn record_fire(&mut self) {
        self.fired += 1;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TimerState::Cancelled
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks that issued a poll
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// When the next tick is expected, while armed
    pub fn next_due(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed { since } => {
                let ticks = u32::try_from(self.fired.saturating_add(1)).unwrap_or(u32::MAX);
                Some(since + self.interval.saturating_mul(ticks))
            }
            _ => None,
        }
    }
}
