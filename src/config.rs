//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::timer::{TimeSpan, TICK};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "workout-timer")]
#[command(about = "Workout timer daemon: chain stopwatch, countdown, Tabata and XY timers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "7420")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the saved timer list
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Scheduler cadence in milliseconds (multiple of 10)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Scheduler period, rounded down to whole engine steps
    pub fn tick_period(&self) -> TimeSpan {
        let step = TICK.as_millis();
        TimeSpan::from_millis((self.tick_ms / step).max(1) * step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["workout-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:7420");
        assert_eq!(config.tick_period().as_millis(), 10);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_tick_period_rounds_to_steps() {
        let config = Config::try_parse_from(["workout-timer", "--tick-ms", "105", "-v"]).unwrap();
        assert_eq!(config.tick_period().as_millis(), 100);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_tick_below_one_step_is_refused() {
        assert!(Config::try_parse_from(["workout-timer", "--tick-ms", "5"]).is_err());
    }
}
