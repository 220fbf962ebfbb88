//! Shared daemon state: the workout behind one lock, plus change channels.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::WorkoutError,
    store::{load_workout, save_workout, TimerStore},
    timer::{TimeSpan, TimerConfig, TimerEvent, TimerId},
    workout::{Workout, WorkoutEvent, WorkoutSnapshot},
};

/// Result of a sequencing command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// False when the command was not legal in the current state
    pub changed: bool,
    pub events: Vec<WorkoutEvent>,
    pub snapshot: WorkoutSnapshot,
}

/// Main application state that owns the workout and publishes its changes
pub struct AppState {
    /// The single mutable workout; every command and tick goes through this lock
    workout: Mutex<Workout>,
    store: Arc<dyn TimerStore>,
    /// How much time each scheduler tick advances the workout
    pub tick_period: TimeSpan,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Workout events as they happen
    event_tx: broadcast::Sender<WorkoutEvent>,
    /// Latest snapshot after every command or tick
    snapshot_tx: watch::Sender<WorkoutSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<WorkoutSnapshot>,
}

impl AppState {
    /// Create the state, restoring the timer list from `store`
    pub fn new(store: Arc<dyn TimerStore>, tick_period: TimeSpan, host: String, port: u16) -> Self {
        let workout = load_workout(store.as_ref());
        info!("Restored {} timers from storage", workout.len());

        let (event_tx, _) = broadcast::channel(256);
        let (snapshot_tx, snapshot_rx) = watch::channel(workout.snapshot());

        Self {
            workout: Mutex::new(workout),
            store,
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Workout> {
        // A panic mid-command cannot leave the workout half-updated: every
        // mutation is a single method call on it.
        self.workout.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> WorkoutSnapshot {
        self.lock().snapshot()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<WorkoutSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkoutEvent> {
        self.event_tx.subscribe()
    }

    // ── Editing ──────────────────────────────────────────────────────

    pub fn add_timer(&self, config: TimerConfig) -> Result<(TimerId, WorkoutSnapshot), WorkoutError> {
        let mut workout = self.lock();
        let id = workout.add_timer(config).inspect_err(|e| warn!("Add timer rejected: {}", e))?;
        save_workout(self.store.as_ref(), &workout);
        let snapshot = self.publish(&workout, &[]);
        drop(workout);

        self.record_action("add");
        Ok((id, snapshot))
    }

    pub fn remove_timer(&self, id: &TimerId) -> Result<WorkoutSnapshot, WorkoutError> {
        let mut workout = self.lock();
        workout.remove_timer(id).inspect_err(|e| warn!("Remove timer rejected: {}", e))?;
        save_workout(self.store.as_ref(), &workout);
        let snapshot = self.publish(&workout, &[]);
        drop(workout);

        self.record_action("remove");
        Ok(snapshot)
    }

    // ── Sequencing ───────────────────────────────────────────────────

    pub fn start(&self) -> CommandOutcome {
        self.run("start", Workout::start_workout)
    }

    pub fn pause(&self) -> CommandOutcome {
        self.run("pause", Workout::pause_timer)
    }

    pub fn resume(&self) -> CommandOutcome {
        self.run("resume", Workout::resume)
    }

    pub fn reset(&self) -> CommandOutcome {
        self.run("reset", Workout::reset_workout)
    }

    pub fn skip(&self) -> CommandOutcome {
        self.run("skip", Workout::skip)
    }

    /// Advance the workout by one scheduler period.
    ///
    /// Saves only when a timer completed or the workout moved on, not on
    /// every tick.
    pub fn tick(&self) -> WorkoutSnapshot {
        let mut workout = self.lock();
        let events = workout.advance(self.tick_period);
        let sequence_changed = events.iter().any(|e| {
            matches!(
                e,
                WorkoutEvent::Advanced { .. }
                    | WorkoutEvent::Finished
                    | WorkoutEvent::Timer { event: TimerEvent::Completed { .. }, .. }
            )
        });
        if sequence_changed {
            save_workout(self.store.as_ref(), &workout);
        }
        self.publish(&workout, &events)
    }

    fn run(&self, action: &str, command: fn(&mut Workout) -> Vec<WorkoutEvent>) -> CommandOutcome {
        let mut workout = self.lock();
        let events = command(&mut workout);
        let changed = !events.is_empty();
        if changed {
            info!("Workout command: {}", action);
            save_workout(self.store.as_ref(), &workout);
        } else {
            debug!("Workout command {} had no effect", action);
        }
        let snapshot = self.publish(&workout, &events);
        drop(workout);

        if changed {
            self.record_action(action);
        }
        CommandOutcome { changed, events, snapshot }
    }

    /// Send events and the fresh snapshot. Called with the lock held so
    /// subscribers see changes in command order.
    fn publish(&self, workout: &Workout, events: &[WorkoutEvent]) -> WorkoutSnapshot {
        for event in events {
            // No subscribers is normal.
            let _ = self.event_tx.send(event.clone());
        }

        let snapshot = workout.snapshot();
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send workout snapshot: {}", e);
        }
        snapshot
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
