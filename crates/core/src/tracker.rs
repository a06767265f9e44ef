// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job tracker
//!
//! One tracker per submitted job. It owns the job, its poll timer and its
//! event bus; trackers share nothing with each other.
//!
//! All tracker state sits behind a single mutex that is never held across an
//! `.await`, so the only interleaving points are the status requests. Two
//! rules keep those safe:
//! - at most one status request is outstanding per tracker; a tick that
//!   finds one in flight is skipped
//! - a reply that lands after the timer was cancelled (by a terminal status
//!   or by `stop`) is discarded unread

use crate::api::DashboardApi;
use crate::clock::{Clock, SystemClock};
use crate::error::PollError;
use crate::event::Event;
use crate::events::{EventBus, EventReceiver, Subscription};
use crate::job::{Effect, Job, JobEvent};
use crate::model::{JobId, JobSnapshot, JobStatus};
use crate::timer::PollTimer;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// What a single timer tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not armed (never started, stopped, or finished); no request made
    Inert,
    /// Previous request still outstanding; no request made
    Skipped,
    /// Request made, but the timer was cancelled before the reply arrived
    Discarded,
    /// Request made and its reply applied
    Applied(JobStatus),
}

struct TrackerState {
    job: Job,
    timer: PollTimer,
    in_flight: bool,
    failure: Option<PollError>,
}

struct Shared<A, C> {
    api: A,
    clock: C,
    state: Mutex<TrackerState>,
    events: EventBus,
    cancel: CancellationToken,
}

/// Polls one job's status until it reaches a terminal state
pub struct JobTracker<A: DashboardApi, C: Clock = SystemClock> {
    shared: Arc<Shared<A, C>>,
}

impl<A: DashboardApi, C: Clock> Clone for JobTracker<A, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: DashboardApi, C: Clock> JobTracker<A, C> {
    pub fn new(api: A, clock: C, job: Job, poll_interval: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                clock,
                state: Mutex::new(TrackerState {
                    job,
                    timer: PollTimer::new(poll_interval),
                    in_flight: false,
                    failure: None,
                }),
                events: EventBus::new(),
                cancel: CancellationToken::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribe to this tracker's events.
    ///
    /// Subscribe before `start` to see the `running` transition.
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        self.shared.events.subscribe(subscription)
    }

    /// Move to `running` and arm the poll timer without spawning the
    /// background loop. The caller drives polling through [`tick`](Self::tick).
    ///
    /// Returns false if the tracker was already started, stopped, or finished.
    pub fn arm(&self) -> bool {
        let mut state = self.state();
        let now = self.shared.clock.now();
        if !state.timer.arm(now) {
            return false;
        }

        let (job, effects) = state.job.transition(JobEvent::Start, &self.shared.clock);
        state.job = job;
        self.apply_effects(&mut state, effects);

        tracing::info!(
            job_id = %state.job.job_id,
            interval_ms = state.timer.interval().as_millis() as u64,
            "polling started"
        );
        true
    }

    /// Move to `running` and poll on a fixed interval in the background.
    ///
    /// The first poll fires one interval after the call. Each tick runs as its
    /// own task so a slow reply never delays the timer; overlapping ticks are
    /// skipped instead. Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        if !self.arm() {
            return false;
        }

        let tracker = self.clone();
        let token = self.shared.cancel.clone();
        let period = self.state().timer.interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let tracker = tracker.clone();
                        tokio::spawn(async move {
                            tracker.tick().await;
                        });
                    }
                }
            }
            tracing::debug!("poll loop exited");
        });

        true
    }

    /// One timer tick: issue a status request if allowed and apply its reply
    pub async fn tick(&self) -> TickOutcome {
        let job_id = {
            let mut state = self.state();
            if !state.timer.is_armed() {
                return TickOutcome::Inert;
            }
            if state.in_flight {
                tracing::debug!(job_id = %state.job.job_id, "previous poll outstanding; skipping tick");
                return TickOutcome::Skipped;
            }
            state.in_flight = true;
            state.timer.record_fire();
            state.job.job_id.clone()
        };

        let result = self.shared.api.job_status(&job_id).await;

        let mut state = self.state();
        state.in_flight = false;

        if !state.timer.is_armed() {
            tracing::debug!(job_id = %job_id, "discarding poll reply that arrived after cancellation");
            return TickOutcome::Discarded;
        }

        let event = match result {
            Ok(report) => {
                tracing::debug!(
                    job_id = %job_id,
                    status = %report.status,
                    progress = report.progress,
                    "poll applied"
                );
                JobEvent::Polled(report)
            }
            Err(source) => {
                let reason = source.to_string();
                state.failure = Some(PollError {
                    job_id: job_id.to_string(),
                    source,
                });
                JobEvent::PollFailed { reason }
            }
        };

        let (job, effects) = state.job.transition(event, &self.shared.clock);
        state.job = job;
        self.apply_effects(&mut state, effects);
        TickOutcome::Applied(state.job.status)
    }

    /// Stop polling. Idempotent; the job's recorded status is left as is.
    ///
    /// A request already in flight is not aborted, but its reply is ignored.
    pub fn stop(&self) {
        let mut state = self.state();
        if state.timer.cancel() {
            tracing::info!(job_id = %state.job.job_id, status = %state.job.status, "polling stopped");
        }
        self.shared.cancel.cancel();
    }

    // Events are published while the state lock is held so subscribers
    // observe them in transition order.
    fn apply_effects(&self, state: &mut TrackerState, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Emit(event) => {
                    if let Event::StatusChanged(snapshot) = &event {
                        if snapshot.status.is_terminal() {
                            tracing::info!(
                                job_id = %snapshot.job_id,
                                status = %snapshot.status,
                                title = %snapshot.process_title,
                                "job finished"
                            );
                        }
                    }
                    self.shared.events.publish(event);
                }
                Effect::CancelPolling => {
                    state.timer.cancel();
                    self.shared.cancel.cancel();
                }
            }
        }
    }

    pub fn job_id(&self) -> JobId {
        self.state().job.job_id.clone()
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.state().job.snapshot()
    }

    pub fn status(&self) -> JobStatus {
        self.state().job.status
    }

    /// Whether the timer can still fire
    pub fn is_polling(&self) -> bool {
        self.state().timer.is_armed()
    }

    /// Status requests issued so far
    pub fn polls_issued(&self) -> u64 {
        self.state().timer.fired()
    }

    /// The failure that forced the job into `error`, if any
    pub fn poll_error(&self) -> Option<PollError> {
        self.state().failure.clone()
    }

    /// Running-state polls that reported lower progress than the previous one.
    ///
    /// The backend is trusted to keep progress non-decreasing; this counter
    /// lets callers and tests check that it did.
    pub fn progress_regressions(&self) -> u32 {
        self.state().job.progress_regressions
    }

    /// Time since the job started running
    pub fn elapsed(&self) -> Option<Duration> {
        self.state().job.elapsed(&self.shared.clock)
    }

    /// Resolves once polling has ended, whether by a terminal status or `stop`
    pub async fn finished(&self) -> JobSnapshot {
        self.shared.cancel.cancelled().await;
        self.snapshot()
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
