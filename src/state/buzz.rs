//! Buzz signals and their vibration patterns

use serde::{Deserialize, Serialize};

const CORRECT_BUZZ_PATTERN: &[u64] = &[100, 100, 100, 100, 100, 100];
const PANIC_BUZZ_PATTERN: &[u64] = &[0, 200];
const GAME_OVER_BUZZ_PATTERN: &[u64] = &[0, 2000];
const NO_BUZZ_PATTERN: &[u64] = &[0];

/// A named haptic-feedback event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuzzType {
    Correct,
    GameOver,
    CountdownPanic,
    #[default]
    NoBuzz,
}

impl BuzzType {
    /// Vibration waveform as alternating off/on durations in milliseconds
    pub fn pattern(self) -> &'static [u64] {
        match self {
            BuzzType::Correct => CORRECT_BUZZ_PATTERN,
            BuzzType::GameOver => GAME_OVER_BUZZ_PATTERN,
            BuzzType::CountdownPanic => PANIC_BUZZ_PATTERN,
            BuzzType::NoBuzz => NO_BUZZ_PATTERN,
        }
    }
}

/// Whether a pattern is the single-zero "no vibration" waveform.
///
/// Platform vibrators reject this pattern, so it must never be played.
pub fn is_silent_pattern(pattern: &[u64]) -> bool {
    pattern == NO_BUZZ_PATTERN
}
