//! Workout ticker background task

use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::state::AppState;

/// Owner of the running ticker task.
///
/// Disposing or dropping the handle aborts the task, releasing the tick
/// schedule.
#[derive(Debug)]
pub struct TickerHandle {
    handle: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Spawn the ticker onto the current runtime
    pub fn spawn(state: Arc<AppState>) -> Self {
        Self {
            handle: Some(tokio::spawn(ticker_task(state))),
        }
    }

    /// Stop ticking for good
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Workout ticker disposed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Background task that advances the workout while a timer is running.
///
/// The task waits on the snapshot channel. While the workout is running it
/// drives a single interval; once the workout stops running the interval is
/// dropped, and a fresh one is created on the next start.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting workout ticker, period {}ms", state.tick_period.as_millis());

    let mut snapshot_rx = state.subscribe_snapshots();
    let period: std::time::Duration = state.tick_period.into();

    loop {
        if !snapshot_rx.borrow_and_update().running {
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, ticker exiting");
                return;
            }
            continue;
        }

        debug!("Workout running, arming tick schedule");
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !state.tick().running {
                        break;
                    }
                }
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !snapshot_rx.borrow_and_update().running {
                        break;
                    }
                }
            }
        }
        debug!("Workout stopped running, tick schedule released");
    }
}
