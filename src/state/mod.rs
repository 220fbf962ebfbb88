//! State management module
//!
//! Shared daemon state wrapping the workout and its change notifications.

pub mod app_state;

// Re-export main types
pub use app_state::{AppState, CommandOutcome};
