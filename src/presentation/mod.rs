//! Presentation layer
//! 
//! This module turns game events into haptic effects, screen text and
//! navigation. It also reads player commands and defines the JSON reports
//! printed by the binary.

pub mod haptics;
pub mod input;
pub mod report;
pub mod screen;

// Re-export main types
pub use haptics::{buzz, Haptics, TerminalHaptics};
pub use input::{spawn_line_reader, PlayerCommand};
pub use report::{EventLine, ScoreReport};
pub use screen::{GameScreen, Navigation, ScoreScreen};
