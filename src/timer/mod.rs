//! Timer primitives: time spans, configurations and the per-timer engine.

pub mod config;
pub mod duration;
pub mod engine;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use config::{is_valid, TimerConfig, TimerKind};
pub use duration::{DisplayParts, TimeParts, TimeSpan};
pub use engine::{Phase, TimerEngine, TimerEvent, TimerStatus, TICK};

/// Opaque timer identifier, stable for the life of a timer.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    /// Fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TimerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TimerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
