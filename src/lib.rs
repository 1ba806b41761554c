//! Guess the Word - a timed word-guessing game
//! 
//! This library provides the game state machine, the scheduler abstraction
//! that drives its countdown, and the presentation layer that turns game
//! events into buzzes, screen text and navigation.

pub mod config;
pub mod error;
pub mod presentation;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, GameConfig};
pub use error::{GameError, Result};
pub use presentation::{GameScreen, Haptics, Navigation, ScoreScreen};
pub use state::{BuzzType, GameEvent, GameSession, GameSnapshot, WordPool};
pub use tasks::{ManualScheduler, Scheduler, TokioScheduler};
pub use utils::signals::shutdown_signal;
