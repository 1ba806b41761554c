//! State management module
//! 
//! This module contains the game state machine, its word pool and buzz
//! signals, and the session that publishes state changes.

pub mod buzz;
pub mod game_state;
pub mod session;
pub mod word_pool;

// Re-export main types
pub use buzz::{is_silent_pattern, BuzzType};
pub use game_state::{GameEvent, GameSnapshot, GameState, Phase};
pub use session::GameSession;
pub use word_pool::{load_words, WordPool, DEFAULT_WORDS};
