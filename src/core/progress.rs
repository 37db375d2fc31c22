//! Progress/output adapter between the orchestrator and a front end.
//!
//! Consumes progress events one at a time, drives a progress indicator and
//! turns the terminal event into the text shown to the user.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::domain::{EventKind, HuntRequest, ProgressEvent};

use super::orchestrator::Orchestrator;

/// Number of stages the progress indicator is divided into
pub const TOTAL_STEPS: usize = 4;

/// Shown when the orchestrator produced no events at all
pub const NO_UPDATES_MESSAGE: &str = "No updates received from the scavenger hunt pipeline.";

/// Receives progress updates; `fraction` is in `0.0..=1.0`
pub trait ProgressSink: Send {
    fn update(&mut self, fraction: f64, desc: &str);
}

/// Logs progress through `tracing`
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn update(&mut self, fraction: f64, desc: &str) {
        info!(percent = (fraction * 100.0).round() as u32, "{}", desc);
    }
}

/// Prints progress lines to stderr, leaving stdout for the hunt itself
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn update(&mut self, fraction: f64, desc: &str) {
        eprintln!("[{:>3}%] {}", (fraction * 100.0).round() as u32, desc);
    }
}

/// Keeps every update in memory
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub updates: Vec<(f64, String)>,
}

impl RecordingProgress {
    pub fn fractions(&self) -> Vec<f64> {
        self.updates.iter().map(|(f, _)| *f).collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn update(&mut self, fraction: f64, desc: &str) {
        self.updates.push((fraction, desc.to_string()));
    }
}

/// Outcome of one generation, as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuntReport {
    /// The finished Markdown hunt
    Completed(String),
    /// The orchestrator reported an error
    Failed(String),
    /// Driving the orchestrator itself went wrong
    Unexpected(String),
    /// No events were received
    Empty,
}

impl HuntReport {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl fmt::Display for HuntReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(markdown) => f.write_str(markdown),
            Self::Failed(message) => write!(f, "❌ Error: {}", message),
            Self::Unexpected(message) => write!(f, "❌ Unexpected error: {}", message),
            Self::Empty => f.write_str(NO_UPDATES_MESSAGE),
        }
    }
}

/// Consume events until a terminal event arrives or the channel closes.
///
/// The `n`th non-terminal event (0-based) reports `n / TOTAL_STEPS`, capped
/// below 1.0; the terminal event reports 1.0.
pub async fn consume_events(
    event_rx: &mut mpsc::Receiver<ProgressEvent>,
    sink: &mut dyn ProgressSink,
) -> HuntReport {
    sink.update(0.0, "Starting scavenger hunt generation...");

    let mut seen = 0usize;

    while let Some(event) = event_rx.recv().await {
        match event.kind {
            EventKind::Complete => {
                sink.update(1.0, "Scavenger hunt complete!");
                return HuntReport::Completed(event.message);
            }
            EventKind::Error => {
                sink.update(1.0, "Generation failed");
                return HuntReport::Failed(event.message);
            }
            EventKind::Start | EventKind::Progress => {
                let step = seen.min(TOTAL_STEPS - 1);
                sink.update(
                    step as f64 / TOTAL_STEPS as f64,
                    &format!("Step {}/{}: {}", step + 1, TOTAL_STEPS, event.step_desc),
                );
                seen += 1;
            }
        }
    }

    sink.update(1.0, "Generation failed");

    if seen == 0 {
        HuntReport::Empty
    } else {
        warn!(events = seen, "Event stream closed without a result");
        HuntReport::Unexpected("pipeline stopped before producing a result".to_string())
    }
}

/// Run one request end to end and return the user-facing report
pub async fn generate_hunt(
    orchestrator: Arc<Orchestrator>,
    request: HuntRequest,
    sink: &mut dyn ProgressSink,
) -> HuntReport {
    let (mut event_rx, handle) = orchestrator.spawn(request);

    let report = consume_events(&mut event_rx, sink).await;
    drop(event_rx);

    match handle.await {
        Ok(()) => report,
        // The sink already got its final update when the channel closed
        Err(e) => {
            error!(error = %e, "Generation task failed");
            HuntReport::Unexpected(e.to_string())
        }
    }
}
