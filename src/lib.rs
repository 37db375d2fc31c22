//! museum-hunt - Museum scavenger hunt generator
//!
//! Generates a scavenger hunt for a museum by chaining four language-model
//! prompts and rendering the combined output as Markdown.
//!
//! # Architecture
//!
//! The pipeline is strictly linear:
//! - Museum Curator researches what is on view
//! - Art Selector picks the artworks
//! - Art Historian adds historical context
//! - Scene Describer writes the numbered hunt
//!
//! The orchestrator reports progress as a short sequence of events that
//! always ends in exactly one `complete` or `error` event.
//!
//! # Modules
//!
//! - `adapters`: Language-model integrations (Hugging Face)
//! - `core`: Orchestration logic (Pipeline, Orchestrator, progress adapter)
//! - `domain`: Data structures (Role, HuntRequest, ProgressEvent)
//! - `server`: Web form
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Generate a hunt in the terminal
//! HF_TOKEN=... museum-hunt generate "El Prado" --items 10
//!
//! # Serve the web form
//! HF_TOKEN=... museum-hunt serve --address 0.0.0.0:7860
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;

// Re-export main types at crate root for convenience
pub use crate::adapters::{LanguageModel, ModelError, ModelOutput, Prompt};
pub use crate::core::{generate_hunt, HuntReport, Orchestrator, ProgressSink};
pub use crate::domain::{EventKind, HuntRequest, ProgressEvent, Role};
