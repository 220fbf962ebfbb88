//! A configured timer inside a workout.

use crate::timer::{TimerConfig, TimerEngine, TimerId, TimerStatus};

/// A timer configuration plus its runtime state and identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerInstance {
    pub id: TimerId,
    pub engine: TimerEngine,
    /// Set when the user moved past the timer before it finished on its own
    pub skipped: bool,
}

impl TimerInstance {
    /// New `NotRunning` timer with a fresh id
    pub fn new(config: TimerConfig) -> Self {
        Self {
            id: TimerId::generate(),
            engine: TimerEngine::new(config),
            skipped: false,
        }
    }

    /// Rebuild a timer loaded from storage, keeping its id.
    pub fn restore(id: TimerId, config: TimerConfig, status: TimerStatus, skipped: bool) -> Self {
        let engine = TimerEngine::restore(config, status);
        // Only a completed timer can carry the skipped mark.
        let skipped = skipped && engine.status() == TimerStatus::Completed;
        Self { id, engine, skipped }
    }

    pub fn config(&self) -> &TimerConfig {
        self.engine.config()
    }

    pub fn status(&self) -> TimerStatus {
        self.engine.status()
    }

    pub(crate) fn reset(&mut self) {
        self.engine.reset();
        self.skipped = false;
    }
}
