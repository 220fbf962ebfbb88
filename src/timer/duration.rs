//! Time span value type and its minute/second/hundredth views.

use std::fmt;

use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;
const MS_PER_HUNDREDTH: u64 = 10;

/// A non-negative span of time in whole milliseconds.
///
/// Arithmetic saturates at zero instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSpan(u64);

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * MS_PER_SECOND)
    }

    pub fn from_parts(minutes: u32, seconds: u32) -> Self {
        Self(minutes as u64 * MS_PER_MINUTE + seconds as u64 * MS_PER_SECOND)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, other: TimeSpan) -> TimeSpan {
        TimeSpan(self.0.saturating_sub(other.0))
    }

    pub fn saturating_add(self, other: TimeSpan) -> TimeSpan {
        TimeSpan(self.0.saturating_add(other.0))
    }

    pub fn saturating_mul(self, factor: u32) -> TimeSpan {
        TimeSpan(self.0.saturating_mul(factor as u64))
    }

    /// Split into clock display units.
    pub fn to_parts(self) -> DisplayParts {
        DisplayParts {
            minutes: self.0 / MS_PER_MINUTE,
            seconds: (self.0 % MS_PER_MINUTE) / MS_PER_SECOND,
            hundredths: (self.0 % MS_PER_SECOND) / MS_PER_HUNDREDTH,
        }
    }
}

impl From<TimeParts> for TimeSpan {
    fn from(parts: TimeParts) -> Self {
        TimeSpan::from_parts(parts.minutes, parts.seconds)
    }
}

impl From<TimeSpan> for std::time::Duration {
    fn from(span: TimeSpan) -> Self {
        std::time::Duration::from_millis(span.0)
    }
}

impl From<std::time::Duration> for TimeSpan {
    fn from(duration: std::time::Duration) -> Self {
        TimeSpan(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_parts(), f)
    }
}

/// The `{minutes, seconds}` pair used by configuration input and storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl TimeParts {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }
}

/// Clock display units of a [`TimeSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayParts {
    pub minutes: u64,
    pub seconds: u64,
    pub hundredths: u64,
}

impl fmt::Display for DisplayParts {
    /// Formats as `M:SS.hh`, e.g. `0:09.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}.{:02}", self.minutes, self.seconds, self.hundredths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_parts() {
        let parts = TimeSpan::from_millis(125_430).to_parts();
        assert_eq!(parts.minutes, 2);
        assert_eq!(parts.seconds, 5);
        assert_eq!(parts.hundredths, 43);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(TimeSpan::from_parts(1, 30).as_millis(), 90_000);
        assert_eq!(TimeSpan::from_parts(0, 0), TimeSpan::ZERO);
        assert_eq!(TimeSpan::from(TimeParts::new(60, 0)).as_millis(), 3_600_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeSpan::from_millis(9_000).to_string(), "0:09.00");
        assert_eq!(TimeSpan::from_millis(61_250).to_string(), "1:01.25");
        assert_eq!(TimeSpan::ZERO.to_string(), "0:00.00");
    }

    #[test]
    fn test_saturating_sub_never_wraps() {
        let span = TimeSpan::from_millis(5);
        assert_eq!(span.saturating_sub(TimeSpan::from_millis(10)), TimeSpan::ZERO);
    }

    proptest! {
        #[test]
        fn parts_round_trip_at_second_granularity(ms in 0u64..100_000_000) {
            let parts = TimeSpan::from_millis(ms).to_parts();
            let rebuilt = TimeSpan::from_parts(parts.minutes as u32, parts.seconds as u32).to_parts();
            prop_assert_eq!(rebuilt.minutes, parts.minutes);
            prop_assert_eq!(rebuilt.seconds, parts.seconds);
            prop_assert_eq!(rebuilt.hundredths, 0);
        }
    }
}
