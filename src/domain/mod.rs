//! Domain types for the scavenger hunt generator.
//!
//! This module contains the core data structures:
//! - Roles: the four fixed personas
//! - HuntRequest: validated user input
//! - ProgressEvent: notifications produced while a hunt is generated

pub mod events;
pub mod hunt;
pub mod role;

// Re-export commonly used types
pub use events::{EventKind, ProgressEvent};
pub use hunt::{HuntRequest, RequestError, DEFAULT_ITEM_COUNT};
pub use role::{Role, CURATOR, DESCRIBER, HISTORIAN, ROLES, SELECTOR};
