//! JSON report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{GameEvent, GameSnapshot};

/// One game event with the time it was observed
#[derive(Debug, Clone, Serialize)]
pub struct EventLine {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: GameEvent,
}

impl EventLine {
    pub fn new(event: GameEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Final report printed when the game ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub status: String,
    pub score: i32,
    pub seconds_left: u64,
    pub timestamp: DateTime<Utc>,
}

impl ScoreReport {
    /// Create a new report from the last snapshot
    pub fn new(status: String, snapshot: &GameSnapshot) -> Self {
        Self {
            status,
            score: snapshot.score,
            seconds_left: snapshot.seconds_left,
            timestamp: Utc::now(),
        }
    }

    /// The countdown ran out
    pub fn finished(snapshot: &GameSnapshot) -> Self {
        Self::new("finished".to_string(), snapshot)
    }

    /// The player quit or the process was signalled
    pub fn aborted(snapshot: &GameSnapshot) -> Self {
        Self::new("aborted".to_string(), snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BuzzType;

    #[test]
    fn event_line_flattens_event() {
        let line = EventLine::new(GameEvent::BuzzChanged {
            buzz: BuzzType::GameOver,
        });
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "buzz_changed");
        assert_eq!(json["buzz"], "game_over");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn aborted_report_keeps_time_left() {
        let snapshot = GameSnapshot {
            score: 4,
            seconds_left: 6,
            ..GameSnapshot::default()
        };
        let report = ScoreReport::aborted(&snapshot);
        assert_eq!(report.status, "aborted");
        assert_eq!(report.score, 4);
        assert_eq!(report.seconds_left, 6);
    }
}
