//! Serialisable read model of a workout, published after every change.

use serde::{Deserialize, Serialize};

use super::aggregator::Workout;
use super::instance::TimerInstance;
use crate::timer::{Phase, TimeParts, TimerId, TimerKind, TimerStatus};

/// One timer as a front end would render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub id: TimerId,
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub work_time: TimeParts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<TimeParts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    pub state: TimerStatus,
    pub skipped: bool,
    /// Elapsed for a stopwatch, remaining in the current phase otherwise
    pub current_ms: u64,
    /// `current_ms` as `M:SS.hh`
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    pub progress: f64,
}

impl From<&TimerInstance> for TimerView {
    fn from(timer: &TimerInstance) -> Self {
        let config = timer.config();
        let engine = &timer.engine;
        Self {
            id: timer.id.clone(),
            kind: config.kind,
            work_time: config.work_time,
            rest_time: config.rest_time,
            rounds: config.rounds,
            state: engine.status(),
            skipped: timer.skipped,
            current_ms: engine.current().as_millis(),
            display: engine.current().to_string(),
            current_round: config.kind.has_rounds().then(|| engine.current_round()),
            phase: (config.kind == TimerKind::Tabata).then(|| engine.phase()),
            progress: engine.progress(),
        }
    }
}

/// Whole-workout state after a command or tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSnapshot {
    pub timers: Vec<TimerView>,
    pub active_index: Option<usize>,
    pub total_duration_ms: u64,
    pub elapsed_total_ms: u64,
    pub editable: bool,
    pub running: bool,
}

impl WorkoutSnapshot {
    pub fn of(workout: &Workout) -> Self {
        Self {
            timers: workout.timers().iter().map(TimerView::from).collect(),
            active_index: workout.active_index(),
            total_duration_ms: workout.total_duration().as_millis(),
            elapsed_total_ms: workout.elapsed_total().as_millis(),
            editable: workout.is_editable(),
            running: workout.is_running(),
        }
    }

    pub fn active(&self) -> Option<&TimerView> {
        self.active_index.and_then(|i| self.timers.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{TimeSpan, TimerConfig};

    #[test]
    fn snapshot_reflects_running_tabata() {
        let mut workout = Workout::new();
        workout
            .add_timer(TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 2))
            .unwrap();
        workout.start_workout();
        workout.advance(TimeSpan::from_secs(21));

        let snapshot = workout.snapshot();
        assert!(snapshot.running);
        assert!(!snapshot.editable);
        assert_eq!(snapshot.total_duration_ms, 60_000);
        assert_eq!(snapshot.elapsed_total_ms, 21_000);

        let active = snapshot.active().unwrap();
        assert_eq!(active.phase, Some(Phase::Rest));
        assert_eq!(active.current_round, Some(1));
        assert_eq!(active.display, "0:09.00");
    }

    #[test]
    fn snapshot_wire_names() {
        let mut workout = Workout::new();
        workout.add_timer(TimerConfig::countdown(TimeParts::new(0, 10))).unwrap();
        let json = serde_json::to_value(workout.snapshot()).unwrap();

        assert_eq!(json["activeIndex"], serde_json::Value::Null);
        assert_eq!(json["timers"][0]["type"], "countdown");
        assert_eq!(json["timers"][0]["state"], "not running");
        assert!(json["timers"][0].get("phase").is_none());
    }
}
