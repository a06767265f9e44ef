// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status card rendering
//!
//! A card is a pure function of a [`JobSnapshot`]; it keeps no state of its
//! own, so re-rendering after every `job:*` event is always safe.

use crate::model::{JobSnapshot, JobStatus};
use std::fmt::Write as _;
use std::time::Duration;

const BAR_CELLS: usize = 20;

/// Status light colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Grey,
    Orange,
    Green,
    Red,
}

impl StatusColor {
    pub fn of(status: JobStatus) -> Self {
        match status {
            JobStatus::Preparing => StatusColor::Grey,
            JobStatus::Running => StatusColor::Orange,
            JobStatus::Completed => StatusColor::Green,
            JobStatus::Error => StatusColor::Red,
        }
    }

    /// CSS-style class name
    pub fn class(self) -> &'static str {
        match self {
            StatusColor::Grey => "grey",
            StatusColor::Orange => "orange",
            StatusColor::Green => "green",
            StatusColor::Red => "red",
        }
    }

    /// ANSI foreground escape for terminals
    pub fn ansi(self) -> &'static str {
        match self {
            StatusColor::Grey => "\x1b[90m",
            StatusColor::Orange => "\x1b[33m",
            StatusColor::Green => "\x1b[32m",
            StatusColor::Red => "\x1b[31m",
        }
    }

    /// `text` wrapped in this colour and a reset
    pub fn paint(self, text: &str) -> String {
        format!("{}{}\x1b[0m", self.ansi(), text)
    }
}

/// Text rendering of one job's status card
pub struct StatusCard;

impl StatusCard {
    pub fn label(status: JobStatus) -> &'static str {
        match status {
            JobStatus::Preparing => "Preparing",
            JobStatus::Running => "Running",
            JobStatus::Completed => "Completed",
            JobStatus::Error => "Error",
        }
    }

    /// `[#####---------------]  25%`
    pub fn progress_bar(progress: u8) -> String {
        let progress = progress.min(100) as usize;
        let filled = progress * BAR_CELLS / 100;
        format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            "-".repeat(BAR_CELLS - filled),
            progress
        )
    }

    pub fn render(snapshot: &JobSnapshot) -> String {
        let color = StatusColor::of(snapshot.status);
        let files = if snapshot.filenames.is_empty() {
            "-".to_string()
        } else {
            snapshot.filenames.join(", ")
        };

        let mut out = String::new();
        let _ = writeln!(out, "Job {} ({})", snapshot.job_id, snapshot.pipeline_name);
        let _ = writeln!(out, "  Files:    {}", files);
        if let Some(submission_id) = &snapshot.submission_id {
            let _ = writeln!(out, "  Batch:    {}", submission_id);
        }
        let _ = writeln!(
            out,
            "  Status:   {} [{}]",
            Self::label(snapshot.status),
            color.class()
        );
        let _ = writeln!(out, "  Progress: {}", Self::progress_bar(snapshot.progress));
        if !snapshot.process_title.is_empty() {
            let _ = writeln!(out, "  Process:  {}", snapshot.process_title);
        }
        out
    }

    /// Card with an elapsed-time line, rounded to whole seconds
    pub fn render_with_elapsed(snapshot: &JobSnapshot, elapsed: Duration) -> String {
        let mut out = Self::render(snapshot);
        let elapsed = Duration::from_secs(elapsed.as_secs());
        let _ = writeln!(out, "  Elapsed:  {}", humantime::format_duration(elapsed));
        out
    }

    /// One-line form used for live updates
    pub fn render_line(snapshot: &JobSnapshot) -> String {
        let mut line = format!(
            "{} {:<9} {}",
            snapshot.job_id,
            Self::label(snapshot.status),
            Self::progress_bar(snapshot.progress)
        );
        if !snapshot.process_title.is_empty() {
            line.push_str("  ");
            line.push_str(&snapshot.process_title);
        }
        line
    }
}
