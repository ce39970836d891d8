//! Terminal bell as an audio sink.

use std::io::{self, Write};

use crate::core::AudioSink;
use crate::types::SoundCue;

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell for every cue when enabled.
///
/// Write errors are swallowed: a missing beep never interrupts play.
pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
    rung: u64,
}

impl BellAudio<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            rung: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Bells actually written.
    pub fn rung(&self) -> u64 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, _cue: SoundCue) {
        if !self.enabled {
            return;
        }
        if self.out.write_all(BEL).and_then(|_| self.out.flush()).is_ok() {
            self.rung += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_when_enabled() {
        let mut bell = BellAudio::new(Vec::new(), true);
        bell.play(SoundCue::BlackOrGoldHit);
        bell.play(SoundCue::RedHit);
        assert_eq!(bell.rung(), 2);
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn test_silent_when_disabled() {
        let mut bell = BellAudio::new(Vec::new(), false);
        bell.play(SoundCue::RedHit);
        assert_eq!(bell.rung(), 0);
        assert!(bell.into_inner().is_empty());
    }
}
