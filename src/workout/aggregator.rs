//! Workout aggregate: the ordered timer list and its sequencing.
//!
//! All mutation goes through the methods here. Each method leaves the list
//! and `active_index` consistent before returning:
//!
//! - at most one timer is running or paused, and it sits at `active_index`
//! - timers before `active_index` are completed, timers after it are not running
//! - the list only changes while no timer is running or paused

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::instance::TimerInstance;
use super::snapshot::WorkoutSnapshot;
use crate::error::{Result, WorkoutError};
use crate::timer::{TimeSpan, TimerConfig, TimerEvent, TimerId, TimerStatus, TICK};

/// Something that happened to the workout during a command or tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutEvent {
    Timer { id: TimerId, event: TimerEvent },
    Advanced { from: usize, to: usize },
    Finished,
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workout {
    timers: Vec<TimerInstance>,
    active_index: Option<usize>,
    elapsed_total: TimeSpan,
}

impl Workout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workout around previously stored timers. No timer is active.
    pub fn from_instances(timers: Vec<TimerInstance>) -> Self {
        Self {
            timers,
            active_index: None,
            elapsed_total: TimeSpan::ZERO,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[TimerInstance] {
        &self.timers
    }

    pub fn get(&self, id: &TimerId) -> Option<&TimerInstance> {
        self.timers.iter().find(|t| &t.id == id)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active(&self) -> Option<&TimerInstance> {
        self.active_index.and_then(|i| self.timers.get(i))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Sum of every timer's `(work + rest) * rounds`.
    pub fn total_duration(&self) -> TimeSpan {
        self.timers
            .iter()
            .fold(TimeSpan::ZERO, |acc, t| acc.saturating_add(t.config().total_duration()))
    }

    /// Time consumed by ticks since the workout last started.
    pub fn elapsed_total(&self) -> TimeSpan {
        self.elapsed_total
    }

    /// True iff no timer is running or paused.
    pub fn is_editable(&self) -> bool {
        !self.timers.iter().any(|t| t.status().is_active())
    }

    /// True while the active timer is running (ticks are wanted).
    pub fn is_running(&self) -> bool {
        self.active().is_some_and(|t| t.status() == TimerStatus::Running)
    }

    pub fn snapshot(&self) -> WorkoutSnapshot {
        WorkoutSnapshot::of(self)
    }

    /// Nothing active, nothing elapsed, every timer untouched.
    fn is_reset(&self) -> bool {
        self.active_index.is_none()
            && self.elapsed_total.is_zero()
            && self.timers.iter().all(|t| t.status() == TimerStatus::NotRunning && !t.skipped)
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Append a validated timer. Returns its new id.
    ///
    /// Fields the timer's kind never uses are dropped.
    pub fn add_timer(&mut self, config: TimerConfig) -> Result<TimerId> {
        config.validate()?;
        let config = config.normalized();
        if !self.is_editable() {
            return Err(WorkoutError::NotEditable);
        }
        let instance = TimerInstance::new(config);
        let id = instance.id.clone();
        info!("Added {} timer {}", instance.config().kind, id);
        self.timers.push(instance);
        Ok(id)
    }

    /// Remove a timer, keeping the order of the rest.
    pub fn remove_timer(&mut self, id: &TimerId) -> Result<TimerInstance> {
        if !self.is_editable() {
            return Err(WorkoutError::NotEditable);
        }
        let index = self
            .timers
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| WorkoutError::UnknownTimer(id.clone()))?;
        info!("Removed timer {}", id);
        Ok(self.timers.remove(index))
    }

    // ── Sequencing ───────────────────────────────────────────────────

    /// Resume a paused workout, or start from the first timer.
    ///
    /// A running workout is left alone.
    pub fn start_workout(&mut self) -> Vec<WorkoutEvent> {
        if let Some(status) = self.active().map(|t| t.status()) {
            return match status {
                TimerStatus::Paused => self.resume(),
                _ => Vec::new(),
            };
        }
        if self.timers.is_empty() {
            return Vec::new();
        }

        for timer in &mut self.timers {
            timer.reset();
        }
        self.elapsed_total = TimeSpan::ZERO;
        self.active_index = Some(0);
        info!("Starting workout with {} timers", self.timers.len());
        self.engine_command(0, |t| t.engine.start())
    }

    pub fn pause_timer(&mut self) -> Vec<WorkoutEvent> {
        match self.active_index {
            Some(index) => self.engine_command(index, |t| t.engine.pause()),
            None => Vec::new(),
        }
    }

    pub fn resume(&mut self) -> Vec<WorkoutEvent> {
        match self.active_index {
            Some(index) => self.engine_command(index, |t| t.engine.resume()),
            None => Vec::new(),
        }
    }

    /// Complete the active timer and move to the next one.
    ///
    /// With `skip`, a timer that had not finished on its own is marked as
    /// skipped. Past the last timer the workout finishes.
    pub fn next_timer(&mut self, skip: bool) -> Vec<WorkoutEvent> {
        let Some(index) = self.active_index else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let current = &mut self.timers[index];
        if current.status().is_active() {
            if let Some(event) = current.engine.fast_forward() {
                events.push(WorkoutEvent::Timer { id: current.id.clone(), event });
            }
            current.skipped = skip;
        }

        let next = index + 1;
        if next < self.timers.len() {
            self.active_index = Some(next);
            debug!("Advancing workout from timer {} to {}", index, next);
            events.push(WorkoutEvent::Advanced { from: index, to: next });
            events.extend(self.engine_command(next, |t| t.engine.start()));
        } else {
            self.active_index = None;
            info!("Workout finished");
            events.push(WorkoutEvent::Finished);
        }
        events
    }

    /// Abandon the active timer early.
    pub fn skip(&mut self) -> Vec<WorkoutEvent> {
        self.next_timer(true)
    }

    /// Every timer back to `NotRunning`, nothing active, totals cleared.
    ///
    /// No events when the workout is already in that state.
    pub fn reset_workout(&mut self) -> Vec<WorkoutEvent> {
        if self.is_reset() {
            return Vec::new();
        }
        for timer in &mut self.timers {
            timer.reset();
        }
        self.active_index = None;
        self.elapsed_total = TimeSpan::ZERO;
        info!("Workout reset");
        vec![WorkoutEvent::Reset]
    }

    /// Drive the active timer forward by `span`, one engine step at a time.
    ///
    /// A timer completing mid-span hands the remaining steps to the next
    /// timer, so auto-advance happens inside the same call.
    pub fn advance(&mut self, span: TimeSpan) -> Vec<WorkoutEvent> {
        let mut steps = span.as_millis().div_ceil(TICK.as_millis());
        let mut events = Vec::new();

        while steps > 0 {
            let Some(index) = self.active_index else { break };
            let timer = &mut self.timers[index];
            if timer.status() != TimerStatus::Running {
                break;
            }

            let event = timer.engine.tick();
            self.elapsed_total = self.elapsed_total.saturating_add(TICK);
            steps -= 1;

            if let Some(event) = event {
                debug!("Timer {} event: {:?}", timer.id, event);
                events.push(WorkoutEvent::Timer { id: timer.id.clone(), event });
                if matches!(event, TimerEvent::Completed { .. }) {
                    events.extend(self.next_timer(false));
                }
            }
        }
        events
    }

    fn engine_command<F>(&mut self, index: usize, command: F) -> Vec<WorkoutEvent>
    where
        F: FnOnce(&mut TimerInstance) -> Option<TimerEvent>,
    {
        let timer = &mut self.timers[index];
        command(timer)
            .map(|event| vec![WorkoutEvent::Timer { id: timer.id.clone(), event }])
            .unwrap_or_default()
    }
}
