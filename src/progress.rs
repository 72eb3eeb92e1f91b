//! Progress reporting for metadata loads
//!
//! The drain loop reports `(processed, total)` after every batch through
//! a sink trait, keeping the load pipeline decoupled from any terminal
//! rendering. Sinks are invoked synchronously from the loop; processed
//! counts are monotonically non-decreasing and never exceed the total.

use colored::Colorize;
use std::io::Write;

/// Callback sink for incremental load progress
pub trait ProgressSink {
    /// Report progress after a batch has been consumed
    ///
    /// # Arguments
    ///
    /// * `processed` - Records seen so far, clamped to `total`
    /// * `total` - Declared total for the whole load
    fn update(&mut self, processed: u64, total: u64);
}

/// Sink that discards all updates (quiet mode, tests)
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _processed: u64, _total: u64) {}
}

/// Sink that renders an in-place progress line on stderr
#[derive(Debug, Default)]
pub struct TerminalProgress {
    finished: bool,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&mut self, processed: u64, total: u64) {
        if self.finished {
            return;
        }

        let percent = if total == 0 {
            100
        } else {
            (processed * 100) / total
        };

        let line = format!(
            "Processed {} of {} series metadata ({}%)",
            processed, total, percent
        );
        eprint!("\r{}", line.cyan());
        let _ = std::io::stderr().flush();

        if processed >= total {
            eprintln!();
            self.finished = true;
        }
    }
}

/// Sink that records every update it receives
///
/// Used by tests to assert on the exact sequence of reports.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub updates: Vec<(u64, u64)>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for RecordingProgress {
    fn update(&mut self, processed: u64, total: u64) {
        self.updates.push((processed, total));
    }
}
