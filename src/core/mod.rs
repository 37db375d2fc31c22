//! Core generation logic.
//!
//! This module contains:
//! - Pipeline: the four step templates and their rendering
//! - Orchestrator: step execution and progress events
//! - Progress: the adapter that turns events into user-facing output
//! - Format: Markdown rendering of the finished hunt

pub mod format;
pub mod orchestrator;
pub mod pipeline;
pub mod progress;

// Re-export commonly used types
pub use format::{reformat_items, render_hunt};
pub use orchestrator::{Orchestrator, PipelineError, NO_HUNT_MESSAGE};
pub use pipeline::{Pipeline, Step, StepId, StepTemplate, STEP_TEMPLATES};
pub use progress::{
    consume_events, generate_hunt, ConsoleProgress, HuntReport, ProgressSink, RecordingProgress,
    TracingProgress, NO_UPDATES_MESSAGE, TOTAL_STEPS,
};
