//! Game and score screens

use std::{fmt, sync::Arc};
use tracing::debug;

use super::haptics::{buzz, Haptics};
use crate::state::{GameEvent, GameSession, GameSnapshot};

/// Where the presentation layer should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ShowScore { score: i32 },
}

/// Screen where the game is played
pub struct GameScreen<H> {
    session: Arc<GameSession>,
    haptics: H,
}

impl<H: Haptics> GameScreen<H> {
    pub fn new(session: Arc<GameSession>, haptics: H) -> Self {
        Self { session, haptics }
    }

    pub fn session(&self) -> &Arc<GameSession> {
        &self.session
    }

    /// React to one game event
    pub fn handle_event(&mut self, event: &GameEvent) -> Option<Navigation> {
        match event {
            GameEvent::BuzzChanged { buzz: kind } => {
                if buzz(&mut self.haptics, kind.pattern()) {
                    self.session.on_buzz_consumed();
                }
                None
            }
            GameEvent::Finished { score } => {
                debug!("Game finished, showing score {}", score);
                Some(Navigation::ShowScore { score: *score })
            }
            _ => None,
        }
    }

    /// One status line for the current state
    pub fn render(&self) -> String {
        render_snapshot(&self.session.snapshot())
    }
}

fn render_snapshot(snapshot: &GameSnapshot) -> String {
    format!(
        "Word: {:<12} Score: {:>3}  Time: {}",
        snapshot.word.as_deref().unwrap_or("-"),
        snapshot.score,
        snapshot.seconds_left_text(),
    )
}

/// Screen shown once the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreScreen {
    pub score: i32,
}

impl From<Navigation> for ScoreScreen {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::ShowScore { score } => Self { score },
        }
    }
}

impl fmt::Display for ScoreScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Final score: {}", self.score)
    }
}
