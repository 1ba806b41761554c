//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::error::{GameError, Result};

/// Total length of a game in milliseconds
pub const COUNTDOWN_TIME_MS: u64 = 8000;
/// Length of one countdown step in milliseconds
pub const ONE_SECOND_MS: u64 = 1000;
/// Remaining seconds at or below which the panic buzz fires
pub const PANIC_TIME_SECS: u64 = 4;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "guess-the-word")]
#[command(about = "A timed word-guessing game with countdown buzzes")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Total game time in milliseconds
    #[arg(short, long, default_value_t = COUNTDOWN_TIME_MS)]
    pub countdown_ms: u64,

    /// Countdown step in milliseconds
    #[arg(long, default_value_t = ONE_SECOND_MS)]
    pub tick_ms: u64,

    /// Number of final seconds that trigger the panic buzz
    #[arg(short, long, default_value_t = PANIC_TIME_SECS)]
    pub panic_secs: u64,

    /// File with one word per line (defaults to the built-in list)
    #[arg(short, long)]
    pub words: Option<PathBuf>,

    /// Seed for the word shuffle, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print events and the final report as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the validated game timing configuration
    pub fn game_config(&self) -> Result<GameConfig> {
        GameConfig::new(
            Duration::from_millis(self.countdown_ms),
            Duration::from_millis(self.tick_ms),
            self.panic_secs,
        )
    }
}

/// Timing of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    countdown: Duration,
    tick_interval: Duration,
    panic_seconds: u64,
    initial_seconds: u64,
}

impl GameConfig {
    pub fn new(countdown: Duration, tick_interval: Duration, panic_seconds: u64) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(GameError::InvalidConfig {
                key: "tick_interval".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let initial_seconds = u64::try_from(countdown.as_millis() / tick_interval.as_millis())
            .ok()
            .and_then(|steps| steps.checked_add(1))
            .ok_or_else(|| GameError::InvalidConfig {
                key: "countdown".to_string(),
                message: "too many countdown steps for the tick interval".to_string(),
            })?;

        Ok(Self {
            countdown,
            tick_interval,
            panic_seconds,
            initial_seconds,
        })
    }

    pub fn countdown(&self) -> Duration {
        self.countdown
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn panic_seconds(&self) -> u64 {
        self.panic_seconds
    }

    /// Countdown value shown when the game starts.
    ///
    /// One more than the number of whole intervals in the countdown, so the
    /// default 8000 ms / 1000 ms game starts at 9.
    pub fn initial_seconds(&self) -> u64 {
        self.initial_seconds
    }

    /// Whether a remaining-seconds value falls in the panic window
    pub fn is_panic(&self, seconds_left: u64) -> bool {
        (1..=self.panic_seconds).contains(&seconds_left)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown: Duration::from_millis(COUNTDOWN_TIME_MS),
            tick_interval: Duration::from_millis(ONE_SECOND_MS),
            panic_seconds: PANIC_TIME_SECS,
            initial_seconds: COUNTDOWN_TIME_MS / ONE_SECOND_MS + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_game_starts_at_nine_seconds() {
        assert_eq!(GameConfig::default().initial_seconds(), 9);
    }

    #[test]
    fn uneven_countdown_rounds_down_then_adds_one() {
        let config = GameConfig::new(
            Duration::from_millis(2500),
            Duration::from_millis(1000),
            1,
        )
        .unwrap();
        assert_eq!(config.initial_seconds(), 3);
    }

    #[test]
    fn panic_window_excludes_zero() {
        let config = GameConfig::default();
        assert!(!config.is_panic(0));
        assert!((1..=4).all(|s| config.is_panic(s)));
        assert!(!config.is_panic(5));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let err = GameConfig::new(Duration::from_secs(8), Duration::ZERO, 4).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn countdown_step_overflow_is_rejected() {
        let config = Config::try_parse_from([
            "guess-the-word",
            "--countdown-ms",
            "18446744073709551615",
            "--tick-ms",
            "1",
        ])
        .unwrap();
        let err = config.game_config().unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { ref key, .. } if key == "countdown"));
    }

    #[test]
    fn largest_countdown_that_fits_is_accepted() {
        let config = GameConfig::new(
            Duration::from_millis(u64::MAX - 1),
            Duration::from_millis(1),
            4,
        )
        .unwrap();
        assert_eq!(config.initial_seconds(), u64::MAX);
    }

    #[test]
    fn cli_defaults_match_original_constants() {
        let config = Config::try_parse_from(["guess-the-word"]).unwrap();
        assert_eq!(config.game_config().unwrap(), GameConfig::default());
        assert_eq!(config.log_level(), "info");
    }
}
