//! Workout Timer - timed intervals chained into workouts
//!
//! This library models stopwatch, countdown, Tabata and XY timers as one
//! state machine, sequences them into a workout, and persists the timer
//! list. The binary hosts it as a small HTTP daemon.

pub mod config;
pub mod error;
pub mod timer;
pub mod workout;
pub mod store;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{StoreError, WorkoutError};
pub use timer::{TimeParts, TimeSpan, TimerConfig, TimerEngine, TimerKind, TimerStatus};
pub use workout::{Workout, WorkoutSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use tasks::TickerHandle;
