//! Single-timer state machine.
//!
//! One engine covers all four kinds. They share the tick-and-transition
//! skeleton and differ only in what happens when a phase runs out.
//!
//! ## State Transitions
//!
//! ```text
//! NotRunning -> Running <-> Paused -> Completed
//!      ^-------------- reset ------------'
//! ```
//!
//! The engine owns no clock. Whoever drives it calls `tick()` (one fixed
//! 10 ms step) or `advance()` while it is running.

use serde::{Deserialize, Serialize};

use super::config::{TimerConfig, TimerKind};
use super::duration::TimeSpan;

/// Length of a single engine step.
pub const TICK: TimeSpan = TimeSpan::from_millis(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    #[serde(rename = "not running")]
    NotRunning,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    /// Running or paused: the timer holds the workout's attention.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerStatus::Running | TimerStatus::Paused)
    }
}

/// Tabata sub-phase. Other kinds stay in `Work`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

/// A transition reported by an engine command or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    PhaseChanged { phase: Phase, round: u32 },
    RoundAdvanced { round: u32 },
    Completed { fast_forwarded: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    config: TimerConfig,
    status: TimerStatus,
    /// Count-up elapsed for a stopwatch, remaining time in the current
    /// phase for every other kind.
    current: TimeSpan,
    round: u32,
    phase: Phase,
}

impl TimerEngine {
    /// Create an engine in `NotRunning` with the kind's baseline value.
    pub fn new(config: TimerConfig) -> Self {
        let current = baseline(&config);
        Self {
            config,
            status: TimerStatus::NotRunning,
            current,
            round: 1,
            phase: Phase::Work,
        }
    }

    /// Rebuild an engine from a persisted status.
    ///
    /// `Completed` is restored at its terminal values. Anything else comes
    /// back as `NotRunning` since no tick stream survives a restart.
    pub fn restore(config: TimerConfig, status: TimerStatus) -> Self {
        let mut engine = Self::new(config);
        if status == TimerStatus::Completed {
            engine.finish();
        }
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn kind(&self) -> TimerKind {
        self.config.kind
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    /// Elapsed time for a stopwatch, remaining time in the current phase
    /// for the other kinds.
    pub fn current(&self) -> TimeSpan {
        self.current
    }

    pub fn current_round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_duration(&self) -> TimeSpan {
        self.config.total_duration()
    }

    /// Time consumed through the whole timer, across rounds and phases.
    pub fn consumed(&self) -> TimeSpan {
        let work = self.config.work();
        let rest = self.config.rest();
        match self.status {
            TimerStatus::NotRunning => TimeSpan::ZERO,
            TimerStatus::Completed => self.total_duration(),
            TimerStatus::Running | TimerStatus::Paused => match self.config.kind {
                TimerKind::Stopwatch => self.current,
                TimerKind::Countdown => work.saturating_sub(self.current),
                TimerKind::Xy => work
                    .saturating_mul(self.round - 1)
                    .saturating_add(work.saturating_sub(self.current)),
                TimerKind::Tabata => {
                    let done = work.saturating_add(rest).saturating_mul(self.round - 1);
                    let in_round = match self.phase {
                        Phase::Work => work.saturating_sub(self.current),
                        Phase::Rest => work.saturating_add(rest.saturating_sub(self.current)),
                    };
                    done.saturating_add(in_round)
                }
            },
        }
    }

    /// 0.0 .. 1.0 progress through the whole timer.
    pub fn progress(&self) -> f64 {
        let total = self.total_duration().as_millis();
        if total == 0 {
            return 0.0;
        }
        (self.consumed().as_millis() as f64 / total as f64).min(1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::NotRunning || !self.config.is_valid() {
            return None;
        }
        self.round = 1;
        self.phase = Phase::Work;
        self.current = match self.config.kind {
            TimerKind::Stopwatch => TimeSpan::ZERO,
            _ => self.config.work(),
        };
        self.status = TimerStatus::Running;
        Some(TimerEvent::Started)
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.status = TimerStatus::Paused;
        Some(TimerEvent::Paused)
    }

    pub fn resume(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Paused {
            return None;
        }
        self.status = TimerStatus::Running;
        Some(TimerEvent::Resumed)
    }

    /// Back to `NotRunning` with baseline values, from any state.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.status = TimerStatus::NotRunning;
        self.current = baseline(&self.config);
        self.round = 1;
        self.phase = Phase::Work;
        Some(TimerEvent::Reset)
    }

    /// Force completion of a running or paused timer.
    pub fn fast_forward(&mut self) -> Option<TimerEvent> {
        if !self.status.is_active() {
            return None;
        }
        self.finish();
        Some(TimerEvent::Completed { fast_forwarded: true })
    }

    /// Advance by one fixed step. Only a running engine moves.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }
        if self.config.kind == TimerKind::Stopwatch {
            let cap = self.config.work();
            self.current = self.current.saturating_add(TICK).min(cap);
            if self.current >= cap {
                self.status = TimerStatus::Completed;
                return Some(TimerEvent::Completed { fast_forwarded: false });
            }
            return None;
        }

        self.current = self.current.saturating_sub(TICK);
        if self.current.is_zero() {
            return Some(self.phase_elapsed());
        }
        None
    }

    /// Apply as many ticks as fit in `span` (rounded up), stopping early if
    /// the engine leaves `Running`.
    pub fn advance(&mut self, span: TimeSpan) -> Vec<TimerEvent> {
        let steps = span.as_millis().div_ceil(TICK.as_millis());
        let mut events = Vec::new();
        for _ in 0..steps {
            if self.status != TimerStatus::Running {
                break;
            }
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Zero-boundary policy, per kind.
    fn phase_elapsed(&mut self) -> TimerEvent {
        let rounds = self.config.round_count();
        match (self.config.kind, self.phase) {
            (TimerKind::Tabata, Phase::Work) => {
                self.phase = Phase::Rest;
                self.current = self.config.rest();
                TimerEvent::PhaseChanged { phase: Phase::Rest, round: self.round }
            }
            (TimerKind::Tabata, Phase::Rest) if self.round < rounds => {
                self.round += 1;
                self.phase = Phase::Work;
                self.current = self.config.work();
                TimerEvent::PhaseChanged { phase: Phase::Work, round: self.round }
            }
            (TimerKind::Xy, _) if self.round < rounds => {
                self.round += 1;
                self.current = self.config.work();
                TimerEvent::RoundAdvanced { round: self.round }
            }
            _ => {
                self.status = TimerStatus::Completed;
                TimerEvent::Completed { fast_forwarded: false }
            }
        }
    }

    fn finish(&mut self) {
        self.current = match self.config.kind {
            TimerKind::Stopwatch => self.config.work(),
            _ => TimeSpan::ZERO,
        };
        if self.config.kind.has_rounds() {
            self.round = self.config.round_count();
        }
        self.status = TimerStatus::Completed;
    }
}

/// Value shown before a timer starts: zero for count-up and XY, the full
/// target for countdown and Tabata.
fn baseline(config: &TimerConfig) -> TimeSpan {
    match config.kind {
        TimerKind::Stopwatch | TimerKind::Xy => TimeSpan::ZERO,
        TimerKind::Countdown | TimerKind::Tabata => config.work(),
    }
}
