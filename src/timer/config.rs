//! Timer configuration and the validity rules for each kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::duration::{TimeParts, TimeSpan};
use crate::error::WorkoutError;

/// The four timer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Stopwatch,
    Countdown,
    Tabata,
    Xy,
}

impl TimerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::Stopwatch => "stopwatch",
            TimerKind::Countdown => "countdown",
            TimerKind::Tabata => "tabata",
            TimerKind::Xy => "xy",
        }
    }

    /// Whether the kind repeats over rounds
    pub fn has_rounds(&self) -> bool {
        matches!(self, TimerKind::Tabata | TimerKind::Xy)
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timer as configured before it runs.
///
/// `work_time` is the cap for a stopwatch, the target for a countdown, and
/// the work phase for Tabata and XY. `rest_time` only matters for Tabata and
/// `rounds` only for Tabata and XY.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub work_time: TimeParts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<TimeParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
}

impl TimerConfig {
    pub fn stopwatch(cap: TimeParts) -> Self {
        Self { kind: TimerKind::Stopwatch, work_time: cap, rest_time: None, rounds: None }
    }

    pub fn countdown(target: TimeParts) -> Self {
        Self { kind: TimerKind::Countdown, work_time: target, rest_time: None, rounds: None }
    }

    pub fn tabata(work: TimeParts, rest: TimeParts, rounds: u32) -> Self {
        Self { kind: TimerKind::Tabata, work_time: work, rest_time: Some(rest), rounds: Some(rounds) }
    }

    pub fn xy(work: TimeParts, rounds: u32) -> Self {
        Self { kind: TimerKind::Xy, work_time: work, rest_time: None, rounds: Some(rounds) }
    }

    pub fn work(&self) -> TimeSpan {
        self.work_time.into()
    }

    /// Rest phase length. Zero when absent or when the kind has no rest phase.
    pub fn rest(&self) -> TimeSpan {
        match self.kind {
            TimerKind::Tabata => self.rest_time.map(TimeSpan::from).unwrap_or(TimeSpan::ZERO),
            _ => TimeSpan::ZERO,
        }
    }

    /// Round count. One when absent or when the kind does not repeat.
    pub fn round_count(&self) -> u32 {
        if self.kind.has_rounds() {
            self.rounds.unwrap_or(1)
        } else {
            1
        }
    }

    /// Drop the fields the kind never runs: `rest_time` outside Tabata and
    /// `rounds` outside Tabata and XY.
    pub fn normalized(mut self) -> Self {
        if self.kind != TimerKind::Tabata {
            self.rest_time = None;
        }
        if !self.kind.has_rounds() {
            self.rounds = None;
        }
        self
    }

    /// Full length of the timer: `(work + rest) * rounds`.
    pub fn total_duration(&self) -> TimeSpan {
        self.work().saturating_add(self.rest()).saturating_mul(self.round_count())
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self)
    }

    /// Same rules as [`is_valid`], naming the first rule that fails.
    pub fn validate(&self) -> Result<(), WorkoutError> {
        if self.work().is_zero() {
            return Err(WorkoutError::InvalidConfig(format!(
                "{} work time must be greater than zero",
                self.kind
            )));
        }
        if self.kind == TimerKind::Tabata && self.rest_time.map_or(true, |r| TimeSpan::from(r).is_zero()) {
            return Err(WorkoutError::InvalidConfig(
                "tabata rest time must be greater than zero".to_string(),
            ));
        }
        if self.kind.has_rounds() && self.rounds.map_or(true, |r| r < 1) {
            return Err(WorkoutError::InvalidConfig(format!(
                "{} needs at least one round",
                self.kind
            )));
        }
        Ok(())
    }
}

/// Decide whether a configuration is runnable.
///
/// - stopwatch, countdown: work time above zero
/// - tabata: work and rest above zero, at least one round
/// - xy: work above zero, at least one round
pub fn is_valid(config: &TimerConfig) -> bool {
    let work_ok = !config.work().is_zero();
    let rounds_ok = config.rounds.is_some_and(|r| r >= 1);
    match config.kind {
        TimerKind::Stopwatch | TimerKind::Countdown => work_ok,
        TimerKind::Tabata => {
            work_ok && config.rest_time.is_some_and(|r| !TimeSpan::from(r).is_zero()) && rounds_ok
        }
        TimerKind::Xy => work_ok && rounds_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_kinds_need_work_time() {
        assert!(TimerConfig::stopwatch(TimeParts::new(0, 5)).is_valid());
        assert!(TimerConfig::countdown(TimeParts::new(1, 0)).is_valid());
        assert!(!TimerConfig::countdown(TimeParts::new(0, 0)).is_valid());
        assert!(!TimerConfig::stopwatch(TimeParts::default()).is_valid());
    }

    #[test]
    fn test_tabata_rules() {
        assert!(TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8).is_valid());
        assert!(!TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 0), 8).is_valid());
        assert!(!TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 0).is_valid());

        let missing_rest = TimerConfig { rest_time: None, ..TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8) };
        assert!(!missing_rest.is_valid());
    }

    #[test]
    fn test_xy_rules() {
        assert!(TimerConfig::xy(TimeParts::new(1, 0), 3).is_valid());
        assert!(!TimerConfig::xy(TimeParts::new(1, 0), 0).is_valid());
        let missing_rounds = TimerConfig { rounds: None, ..TimerConfig::xy(TimeParts::new(1, 0), 3) };
        assert!(!missing_rounds.is_valid());
    }

    #[test]
    fn test_validate_agrees_with_is_valid() {
        let configs = [
            TimerConfig::stopwatch(TimeParts::new(0, 0)),
            TimerConfig::countdown(TimeParts::new(0, 10)),
            TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 0), 2),
            TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 2),
            TimerConfig::xy(TimeParts::new(0, 30), 0),
            TimerConfig::xy(TimeParts::new(0, 30), 4),
        ];
        for config in configs {
            assert_eq!(config.validate().is_ok(), config.is_valid(), "{config:?}");
        }
    }

    #[test]
    fn test_total_duration() {
        let tabata = TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8);
        assert_eq!(tabata.total_duration().as_millis(), 240_000);
        assert_eq!(TimerConfig::countdown(TimeParts::new(0, 10)).total_duration().as_millis(), 10_000);
        assert_eq!(TimerConfig::xy(TimeParts::new(1, 0), 3).total_duration().as_millis(), 180_000);
    }

    #[test]
    fn test_stray_fields_do_not_count() {
        let stopwatch = TimerConfig {
            rest_time: Some(TimeParts::new(0, 10)),
            rounds: Some(3),
            ..TimerConfig::stopwatch(TimeParts::new(0, 5))
        };
        assert_eq!(stopwatch.total_duration().as_millis(), 5_000);

        let xy = TimerConfig { rest_time: Some(TimeParts::new(0, 10)), ..TimerConfig::xy(TimeParts::new(0, 5), 2) };
        assert_eq!(xy.rest(), TimeSpan::ZERO);
        assert_eq!(xy.total_duration().as_millis(), 10_000);
    }

    #[test]
    fn test_normalized_drops_unused_fields() {
        let countdown = TimerConfig {
            rest_time: Some(TimeParts::new(0, 10)),
            rounds: Some(4),
            ..TimerConfig::countdown(TimeParts::new(0, 30))
        };
        assert_eq!(countdown.normalized(), TimerConfig::countdown(TimeParts::new(0, 30)));

        let xy = TimerConfig { rest_time: Some(TimeParts::new(0, 10)), ..TimerConfig::xy(TimeParts::new(1, 0), 3) };
        assert_eq!(xy.normalized(), TimerConfig::xy(TimeParts::new(1, 0), 3));

        let tabata = TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8);
        assert_eq!(tabata.clone().normalized(), tabata);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"type":"tabata","workTime":{"minutes":0,"seconds":20},"restTime":{"minutes":0,"seconds":10},"rounds":8}"#;
        let config: TimerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, TimerConfig::tabata(TimeParts::new(0, 20), TimeParts::new(0, 10), 8));

        let countdown: TimerConfig =
            serde_json::from_str(r#"{"type":"countdown","workTime":{"minutes":2,"seconds":0}}"#).unwrap();
        assert_eq!(countdown.rest(), TimeSpan::ZERO);
        assert_eq!(countdown.round_count(), 1);
    }
}
