//! Error types for game construction and configuration.
//!
//! Game operations themselves never fail; everything here happens before a
//! session is running.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up a game.
#[derive(Error, Debug)]
pub enum GameError {
    /// A word pool needs at least one word to draw from
    #[error("Word list is empty")]
    EmptyWordList,

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    /// Failed to read a word list file
    #[error("Failed to read word list from {path}: {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tokio scheduler was created outside of a runtime
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Result type alias for GameError
pub type Result<T, E = GameError> = std::result::Result<T, E>;
