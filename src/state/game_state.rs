//! Timed word-game state machine
//!
//! The state has no timer of its own: the owner calls `tick()` once per
//! countdown step and forwards the returned events.
//!
//! ```text
//! NotStarted -> Running -> Finished
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{buzz::BuzzType, word_pool::WordPool};
use crate::{config::GameConfig, utils::format_elapsed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Finished,
}

/// A single observable change of the game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    WordChanged { word: String },
    ScoreChanged { score: i32 },
    SecondsLeftChanged { seconds_left: u64 },
    BuzzChanged { buzz: BuzzType },
    Finished { score: i32 },
}

/// Everything a view needs to draw the game at one instant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub word: Option<String>,
    pub score: i32,
    pub seconds_left: u64,
    pub buzz: BuzzType,
    pub finished: bool,
}

impl GameSnapshot {
    /// Remaining time as `MM:SS`
    pub fn seconds_left_text(&self) -> String {
        format_elapsed(self.seconds_left)
    }
}

/// Word, score and countdown of one game
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    pool: WordPool,
    phase: Phase,
    word: Option<String>,
    score: i32,
    seconds_left: u64,
    buzz: BuzzType,
    disposed: bool,
}

impl GameState {
    pub fn new(config: GameConfig, pool: WordPool) -> Self {
        Self {
            config,
            pool,
            phase: Phase::NotStarted,
            word: None,
            score: 0,
            seconds_left: config.initial_seconds(),
            buzz: BuzzType::NoBuzz,
            disposed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    pub fn buzz(&self) -> BuzzType {
        self.buzz
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            word: self.word.clone(),
            score: self.score,
            seconds_left: self.seconds_left,
            buzz: self.buzz,
            finished: self.is_finished(),
        }
    }

    fn is_running(&self) -> bool {
        self.phase == Phase::Running && !self.disposed
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Reset score and countdown, shuffle the words and show the first one.
    ///
    /// Only the first call has any effect.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::NotStarted || self.disposed {
            debug!("Ignoring start in phase {:?}", self.phase);
            return Vec::new();
        }

        self.pool.reset();
        self.score = 0;
        self.seconds_left = self.config.initial_seconds();
        self.phase = Phase::Running;
        info!("Game started with {} seconds on the clock", self.seconds_left);

        let mut events = vec![self.next_word()];
        events.push(GameEvent::ScoreChanged { score: self.score });
        events.push(GameEvent::SecondsLeftChanged {
            seconds_left: self.seconds_left,
        });
        events
    }

    /// Advance the countdown by one step
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        debug!("Tick: {} seconds left", self.seconds_left);
        let mut events = vec![GameEvent::SecondsLeftChanged {
            seconds_left: self.seconds_left,
        }];

        if self.config.is_panic(self.seconds_left) {
            events.push(self.set_buzz(BuzzType::CountdownPanic));
        }

        if self.seconds_left == 0 {
            info!("Time is up, final score {}", self.score);
            events.push(self.set_buzz(BuzzType::GameOver));
            self.phase = Phase::Finished;
            events.push(GameEvent::Finished { score: self.score });
        }

        events
    }

    /// The current word was guessed
    pub fn on_correct(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            debug!("Ignoring correct in phase {:?}", self.phase);
            return Vec::new();
        }

        self.score += 1;
        vec![
            self.set_buzz(BuzzType::Correct),
            GameEvent::ScoreChanged { score: self.score },
            self.next_word(),
        ]
    }

    /// The current word was passed over
    pub fn on_skip(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            debug!("Ignoring skip in phase {:?}", self.phase);
            return Vec::new();
        }

        self.score -= 1;
        vec![GameEvent::ScoreChanged { score: self.score }, self.next_word()]
    }

    /// The pending buzz has been played
    pub fn on_buzz_consumed(&mut self) -> Vec<GameEvent> {
        if self.buzz == BuzzType::NoBuzz || self.disposed {
            return Vec::new();
        }
        vec![self.set_buzz(BuzzType::NoBuzz)]
    }

    /// Stop accepting any further changes
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    fn set_buzz(&mut self, buzz: BuzzType) -> GameEvent {
        self.buzz = buzz;
        GameEvent::BuzzChanged { buzz }
    }

    fn next_word(&mut self) -> GameEvent {
        let word = self.pool.draw();
        self.word = Some(word.clone());
        GameEvent::WordChanged { word }
    }
}
