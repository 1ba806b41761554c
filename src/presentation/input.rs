//! Player input from the terminal

use std::{
    io::{BufRead, BufReader, Read},
    thread,
};
use tokio::sync::mpsc;
use tracing::debug;

/// Buffered lines before the reader thread blocks
const INPUT_CAPACITY: usize = 16;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Correct,
    Skip,
    Quit,
}

impl PlayerCommand {
    /// Parse one input line; an empty line counts as correct
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "c" | "correct" => Some(Self::Correct),
            "s" | "skip" => Some(Self::Skip),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Read lines on a dedicated thread so a pending read never holds up exit.
///
/// The channel closes when the input reaches end of file.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<String>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel(INPUT_CAPACITY);
    thread::spawn(move || {
        for line in BufReader::new(input).lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("Input reader finished");
    });
    rx
}
