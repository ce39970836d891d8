//! Audio sink capability.
//!
//! The simulation only announces [`SoundCue`]s; playing them (or not) is up to
//! whatever sink the caller passes into [`crate::GameState::tick`].

use crate::types::SoundCue;

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in emission order.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    cues: Vec<SoundCue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
