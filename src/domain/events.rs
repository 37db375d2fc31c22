//! Progress events emitted while a scavenger hunt is generated.
//!
//! The orchestrator produces these in order; the progress adapter consumes
//! them one at a time. Exactly one `Complete` or `Error` event ends a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single progress notification for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The run this event belongs to
    pub run_id: Uuid,

    /// When this event occurred
    pub timestamp: DateTime<Utc>,

    /// Kind of event
    pub kind: EventKind,

    /// Short description of the current step (shown next to the progress bar)
    pub step_desc: String,

    /// Message text; for `Complete` this is the full Markdown hunt
    pub message: String,
}

impl ProgressEvent {
    /// Create a new event with the current timestamp
    pub fn new(
        run_id: Uuid,
        kind: EventKind,
        step_desc: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            timestamp: Utc::now(),
            kind,
            step_desc: step_desc.into(),
            message: message.into(),
        }
    }

    pub fn start(run_id: Uuid, step_desc: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(run_id, EventKind::Start, step_desc, message)
    }

    pub fn progress(run_id: Uuid, step_desc: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(run_id, EventKind::Progress, step_desc, message)
    }

    pub fn complete(run_id: Uuid, step_desc: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(run_id, EventKind::Complete, step_desc, message)
    }

    pub fn error(run_id: Uuid, step_desc: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(run_id, EventKind::Error, step_desc, message)
    }

    /// Whether this event ends the sequence
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

/// Kinds of progress events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Generation has been accepted and is starting
    Start,

    /// An intermediate pipeline stage is starting
    Progress,

    /// The hunt was generated; the message holds the Markdown
    Complete,

    /// Generation failed; the message holds a human-readable reason
    Error,
}

impl EventKind {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}
