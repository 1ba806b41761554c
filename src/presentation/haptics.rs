//! Haptic feedback for buzz signals

use std::io::Write;
use tracing::{debug, warn};

use crate::state::is_silent_pattern;

/// A device that can play a vibration waveform.
///
/// Patterns alternate off and on durations in milliseconds, starting with an
/// off delay.
pub trait Haptics: Send {
    fn vibrate(&mut self, pattern: &[u64]);
}

/// Play a buzz pattern, returning whether anything was played.
///
/// The single-zero "no vibration" pattern is skipped instead of being handed
/// to the device.
pub fn buzz(haptics: &mut dyn Haptics, pattern: &[u64]) -> bool {
    if is_silent_pattern(pattern) {
        return false;
    }
    haptics.vibrate(pattern);
    true
}

/// Rings the terminal bell once per vibration pulse
#[derive(Debug)]
pub struct TerminalHaptics<W> {
    out: W,
}

impl<W: Write + Send> TerminalHaptics<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalHaptics<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

/// Number of "on" segments with a non-zero duration
fn pulses(pattern: &[u64]) -> usize {
    pattern
        .iter()
        .skip(1)
        .step_by(2)
        .filter(|&&ms| ms > 0)
        .count()
}

impl<W: Write + Send> Haptics for TerminalHaptics<W> {
    fn vibrate(&mut self, pattern: &[u64]) {
        let count = pulses(pattern);
        debug!("Vibrating pattern {:?} as {} bells", pattern, count);

        let bells = "\x07".repeat(count);
        if let Err(e) = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|_| self.out.flush())
        {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BuzzType;

    #[derive(Default)]
    struct Recorder(Vec<Vec<u64>>);

    impl Haptics for Recorder {
        fn vibrate(&mut self, pattern: &[u64]) {
            self.0.push(pattern.to_vec());
        }
    }

    #[test]
    fn silent_pattern_never_reaches_device() {
        let mut device = Recorder::default();
        assert!(!buzz(&mut device, BuzzType::NoBuzz.pattern()));
        assert!(!buzz(&mut device, &[0]));
        assert!(device.0.is_empty());
    }

    #[test]
    fn every_other_pattern_is_played() {
        let mut device = Recorder::default();
        for kind in [BuzzType::Correct, BuzzType::CountdownPanic, BuzzType::GameOver] {
            assert!(buzz(&mut device, kind.pattern()));
        }
        assert_eq!(device.0.len(), 3);
        assert_eq!(device.0[2], vec![0, 2000]);
    }

    #[test]
    fn terminal_rings_once_per_pulse() {
        let mut terminal = TerminalHaptics::new(Vec::new());
        terminal.vibrate(BuzzType::Correct.pattern());
        terminal.vibrate(BuzzType::GameOver.pattern());
        assert_eq!(terminal.into_inner(), b"\x07\x07\x07\x07".to_vec());
    }
}
