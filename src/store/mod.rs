//! Persistence gateway
//!
//! The timer list is kept as one JSON blob under a fixed key. Loading never
//! fails: an unreadable blob gives an empty list and a corrupt record is
//! skipped on its own.

pub mod file;
pub mod memory;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::timer::{TimeParts, TimerConfig, TimerId, TimerKind, TimerStatus};
use crate::workout::{TimerInstance, Workout};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key the timer list is stored under
pub const STORE_KEY: &str = "timers";

/// One persisted timer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTimer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub work_time: TimeParts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<TimeParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub state: TimerStatus,
    #[serde(default)]
    pub skipped: bool,
}

impl StoredTimer {
    pub fn config(&self) -> TimerConfig {
        TimerConfig {
            kind: self.kind,
            work_time: self.work_time,
            rest_time: self.rest_time,
            rounds: self.rounds,
        }
        .normalized()
    }

    /// Rebuild the runtime timer, or `None` if the record is not runnable.
    pub fn into_instance(self) -> Option<TimerInstance> {
        let config = self.config();
        if !config.is_valid() || self.id.is_empty() {
            return None;
        }
        Some(TimerInstance::restore(TimerId::from(self.id), config, self.state, self.skipped))
    }
}

impl From<&TimerInstance> for StoredTimer {
    fn from(timer: &TimerInstance) -> Self {
        let config = timer.config();
        Self {
            id: timer.id.to_string(),
            kind: config.kind,
            work_time: config.work_time,
            rest_time: config.rest_time,
            rounds: config.rounds,
            state: timer.status(),
            skipped: timer.skipped,
        }
    }
}

/// Key-value blob storage for the timer list.
pub trait TimerStore: Send + Sync {
    /// Raw blob under `key`, `None` if nothing was stored yet.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// Load every readable record. Never fails.
    fn load(&self) -> Vec<StoredTimer> {
        match self.read(STORE_KEY) {
            Ok(Some(blob)) => decode_records(&blob),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored timers, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the list. Failures are logged, not returned.
    fn save(&self, timers: &[StoredTimer]) {
        let result = serde_json::to_string_pretty(timers)
            .map_err(StoreError::from)
            .and_then(|blob| self.write(STORE_KEY, &blob));
        match result {
            Ok(()) => debug!("Saved {} timers", timers.len()),
            Err(e) => warn!("Failed to save timers: {}", e),
        }
    }
}

/// Decode a stored blob record by record.
pub fn decode_records(blob: &str) -> Vec<StoredTimer> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(values) => values,
        Err(e) => {
            warn!("Stored timer list is corrupt, starting empty: {}", e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<StoredTimer>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping corrupt timer record #{}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Build a workout from whatever the store holds.
///
/// A record repeating the id of an earlier loaded record is treated as corrupt.
pub fn load_workout(store: &dyn TimerStore) -> Workout {
    let mut seen = HashSet::new();
    let timers = store
        .load()
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            let Some(instance) = record.into_instance() else {
                warn!("Skipping invalid stored timer {:?}", id);
                return None;
            };
            if !seen.insert(id) {
                warn!("Skipping stored timer with duplicate id {:?}", instance.id.as_str());
                return None;
            }
            Some(instance)
        })
        .collect();
    Workout::from_instances(timers)
}

pub fn save_workout(store: &dyn TimerStore, workout: &Workout) {
    let records: Vec<StoredTimer> = workout.timers().iter().map(StoredTimer::from).collect();
    store.save(&records);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_default() {
        let blob = r#"[{"id":"a","type":"countdown","workTime":{"minutes":0,"seconds":30}}]"#;
        let records = decode_records(blob);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, TimerStatus::NotRunning);
        assert!(!records[0].skipped);
        assert_eq!(records[0].config().total_duration().as_millis(), 30_000);
    }

    #[test]
    fn test_corrupt_record_is_skipped_individually() {
        let blob = r#"[
            {"id":"a","type":"countdown","workTime":{"minutes":0,"seconds":30},"state":"completed","skipped":true},
            {"id":"b","type":"rowing","workTime":{"minutes":1,"seconds":0}},
            "garbage",
            {"id":"c","type":"xy","workTime":{"minutes":1,"seconds":0},"rounds":3,"state":"running"}
        ]"#;
        let ids: Vec<_> = decode_records(blob).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_corrupt_blob_gives_empty_list() {
        assert!(decode_records("{not json").is_empty());
        assert!(decode_records(r#"{"timers":[]}"#).is_empty());
    }

    #[test]
    fn test_active_states_restore_as_not_running() {
        let store = MemoryStore::new();
        store
            .write(
                STORE_KEY,
                r#"[
                    {"id":"a","type":"countdown","workTime":{"minutes":0,"seconds":30},"state":"completed","skipped":true},
                    {"id":"b","type":"countdown","workTime":{"minutes":0,"seconds":30},"state":"paused","skipped":true},
                    {"id":"c","type":"countdown","workTime":{"minutes":0,"seconds":0}}
                ]"#,
            )
            .unwrap();

        let workout = load_workout(&store);
        assert_eq!(workout.len(), 2);
        assert_eq!(workout.timers()[0].status(), TimerStatus::Completed);
        assert!(workout.timers()[0].skipped);
        assert_eq!(workout.timers()[1].status(), TimerStatus::NotRunning);
        assert!(!workout.timers()[1].skipped);
        assert!(workout.is_editable());
        assert_eq!(workout.active_index(), None);
    }

    #[test]
    fn test_duplicate_ids_keep_first_record() {
        let store = MemoryStore::new();
        store
            .write(
                STORE_KEY,
                r#"[
                    {"id":"a","type":"countdown","workTime":{"minutes":0,"seconds":30}},
                    {"id":"b","type":"stopwatch","workTime":{"minutes":1,"seconds":0}},
                    {"id":"a","type":"xy","workTime":{"minutes":1,"seconds":0},"rounds":3}
                ]"#,
            )
            .unwrap();

        let mut workout = load_workout(&store);
        let ids: Vec<_> = workout.timers().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(workout.timers()[0].config().kind, TimerKind::Countdown);

        workout.remove_timer(&TimerId::from("a")).unwrap();
        assert!(workout.get(&TimerId::from("a")).is_none());
    }

    #[test]
    fn test_stored_unused_fields_are_dropped() {
        let blob = r#"[{"id":"a","type":"countdown","workTime":{"minutes":0,"seconds":30},"restTime":{"minutes":0,"seconds":10},"rounds":4}]"#;
        let records = decode_records(blob);
        assert_eq!(records[0].config(), TimerConfig::countdown(TimeParts::new(0, 30)));
        assert_eq!(records[0].config().total_duration().as_millis(), 30_000);
    }

    #[test]
    fn test_save_then_load_keeps_ids_and_order() {
        let store = MemoryStore::new();
        let mut workout = Workout::new();
        let first = workout
            .add_timer(TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8))
            .unwrap();
        let second = workout.add_timer(TimerConfig::stopwatch(TimeParts::new(5, 0))).unwrap();
        save_workout(&store, &workout);

        let loaded = load_workout(&store);
        let ids: Vec<_> = loaded.timers().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(loaded.total_duration(), workout.total_duration());
    }
}
