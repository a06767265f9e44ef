// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{pipeline, submission};
use std::sync::{Arc, Mutex};
use yare::parameterized;

fn gate_with(submission_mode: bool, has_pipeline: bool, has_submission: bool) -> SelectionGate {
    let mut gate = SelectionGate::new(submission_mode);
    if has_pipeline {
        gate.set_pipeline(Some(pipeline("rna-seq")));
    }
    if has_submission {
        gate.set_submission(Some(submission("7")));
    }
    gate
}

#[parameterized(
    neither = { false, false, false },
    submission_only = { false, true, false },
    pipeline_only = { true, false, false },
    both = { true, true, true },
)]
fn ready_in_submission_mode(has_pipeline: bool, has_submission: bool, expected: bool) {
    let gate = gate_with(true, has_pipeline, has_submission);
    assert_eq!(gate.is_ready(), expected);
}

#[parameterized(
    unset = { false, false },
    set = { true, true },
)]
fn ready_without_submission_mode(has_pipeline: bool, expected: bool) {
    let gate = gate_with(false, has_pipeline, false);
    assert_eq!(gate.is_ready(), expected);
}

#[test]
fn submission_is_ignored_outside_submission_mode() {
    let gate = gate_with(false, false, true);
    assert!(!gate.is_ready());
    let gate = gate_with(false, true, true);
    assert!(gate.is_ready());
}

#[test]
fn readiness_is_recomputed_after_clearing() {
    let mut gate = gate_with(true, true, true);
    assert!(gate.is_ready());
    gate.set_pipeline(None);
    assert!(!gate.is_ready());
    gate.set_pipeline(Some(pipeline("wgs")));
    assert!(gate.is_ready());
    gate.set_submission(None);
    assert!(!gate.is_ready());
}

#[test]
fn listener_sees_every_change_synchronously() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut gate = SelectionGate::new(true);
    let sink = Arc::clone(&seen);
    gate.on_change(move |ready| sink.lock().unwrap().push(ready));

    gate.set_pipeline(Some(pipeline("rna-seq")));
    assert_eq!(*seen.lock().unwrap(), vec![false]);

    gate.set_submission(Some(submission("7")));
    assert_eq!(*seen.lock().unwrap(), vec![false, true]);

    // Same value again is still a user action and still notifies
    gate.set_submission(Some(submission("7")));
    gate.set_pipeline(None);
    assert_eq!(*seen.lock().unwrap(), vec![false, true, true, false]);
}

#[test]
fn new_listener_replaces_old_one() {
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));
    let mut gate = SelectionGate::new(false);

    let sink = Arc::clone(&first);
    gate.on_change(move |_| *sink.lock().unwrap() += 1);
    gate.set_pipeline(Some(pipeline("rna-seq")));

    let sink = Arc::clone(&second);
    gate.on_change(move |_| *sink.lock().unwrap() += 1);
    gate.set_pipeline(None);

    assert_eq!(*first.lock().unwrap(), 1);
    assert_eq!(*second.lock().unwrap(), 1);
}
