//! Workout module
//!
//! The ordered list of configured timers and the sequencing between them.

pub mod aggregator;
pub mod instance;
pub mod snapshot;

pub use aggregator::{Workout, WorkoutEvent};
pub use instance::TimerInstance;
pub use snapshot::{TimerView, WorkoutSnapshot};
