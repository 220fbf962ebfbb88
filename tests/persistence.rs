use std::fs;

use workout_timer::store::{load_workout, save_workout, JsonFileStore, TimerStore, STORE_KEY};
use workout_timer::timer::{TimeParts, TimeSpan, TimerConfig, TimerStatus};
use workout_timer::workout::Workout;

#[test]
fn timer_list_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let mut workout = Workout::new();
    let a = workout.add_timer(TimerConfig::countdown(TimeParts::new(0, 1))).unwrap();
    let b = workout
        .add_timer(TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8))
        .unwrap();
    workout.start_workout();
    workout.advance(TimeSpan::from_secs(2));
    save_workout(&store, &workout);

    let restored = load_workout(&JsonFileStore::new(dir.path()));
    let ids: Vec<_> = restored.timers().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(restored.timers()[0].status(), TimerStatus::Completed);
    assert_eq!(restored.timers()[1].status(), TimerStatus::NotRunning);
    assert_eq!(restored.active_index(), None);
    assert!(restored.is_editable());
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("not-created-yet"));
    assert!(store.load().is_empty());
    assert!(load_workout(&store).is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    fs::write(store.path_for(STORE_KEY), "\u{0}\u{1}not json").unwrap();
    assert!(load_workout(&store).is_empty());
}

#[test]
fn save_creates_data_dir_and_writes_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("data"));

    let mut workout = Workout::new();
    workout.add_timer(TimerConfig::xy(TimeParts::new(1, 0), 3)).unwrap();
    save_workout(&store, &workout);

    let blob = fs::read_to_string(store.path_for(STORE_KEY)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(json[0]["type"], "xy");
    assert_eq!(json[0]["workTime"]["minutes"], 1);
    assert_eq!(json[0]["rounds"], 3);
    assert_eq!(json[0]["state"], "not running");
    assert_eq!(json[0]["skipped"], false);
    assert!(json[0].get("restTime").is_none());
}
