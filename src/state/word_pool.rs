//! Shuffled word reservoir, drawn without replacement

use std::{fs, path::Path};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::error::{GameError, Result};

/// Words used when no word list file is given
pub const DEFAULT_WORDS: &[&str] = &[
    "queen",
    "hospital",
    "basketball",
    "cat",
    "change",
    "snail",
    "soup",
    "calendar",
    "sad",
    "desk",
    "guitar",
    "home",
    "railway",
    "zebra",
    "jelly",
    "car",
    "crow",
    "trade",
    "bag",
    "roll",
    "bubble",
];

/// Read a word list, one word per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#`
/// are skipped.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| GameError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_words(&contents);
    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn parse_words(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Pool of candidate words.
///
/// Words are drawn in a random order until the pool runs dry, at which point
/// the full source list is reshuffled.
#[derive(Debug)]
pub struct WordPool {
    source: Vec<String>,
    /// Shuffled remaining words; the next word is at the end
    remaining: Vec<String>,
    last_drawn: Option<String>,
    rng: StdRng,
}

impl WordPool {
    /// Create a pool shuffled from OS entropy
    pub fn new(words: Vec<String>) -> Result<Self> {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    /// Create a pool with a reproducible shuffle order
    pub fn with_seed(words: Vec<String>, seed: u64) -> Result<Self> {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: Vec<String>, rng: StdRng) -> Result<Self> {
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }
        Ok(Self {
            source: words,
            remaining: Vec::new(),
            last_drawn: None,
            rng,
        })
    }

    /// Pool over the built-in word list
    pub fn default_words() -> Vec<String> {
        DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
    }

    /// Words left before the next refill
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Discard what is left and reshuffle the full list.
    ///
    /// The shuffle is conditioned on the previous word: it never comes first.
    pub fn reset(&mut self) {
        self.remaining = self.source.clone();
        self.remaining.shuffle(&mut self.rng);

        // Keep a refill from repeating the word that was just shown
        if let Some(last) = &self.last_drawn {
            let end = self.remaining.len() - 1;
            if &self.remaining[end] == last {
                if let Some(i) = self.remaining.iter().position(|w| w != last) {
                    self.remaining.swap(i, end);
                }
            }
        }
        debug!("Word pool reshuffled with {} words", self.remaining.len());
    }

    /// Take the next word, refilling first when the pool is exhausted
    pub fn draw(&mut self) -> String {
        if self.remaining.is_empty() {
            self.reset();
        }
        // The source list is non-empty, so a refill always yields a word.
        let word = self.remaining.pop().unwrap_or_default();
        self.last_drawn = Some(word.clone());
        word
    }
}
