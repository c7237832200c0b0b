//! Audio collaborator seam.
//!
//! Playback is fire-and-forget: the sequencer never waits on a sink, and a
//! sink that fails or drops cues has no effect on timer correctness.

/// Ambient loops and one-shot cues, invoked by session controllers on
/// start/stop and phase transitions.
pub trait AudioSink {
    /// Start looping an ambient track, replacing any current one.
    fn play_loop(&mut self, track: &str);

    /// Stop ambient playback.
    fn stop(&mut self);

    /// Play a short one-shot cue (phase transitions).
    fn play_cue(&mut self, cue: &str);
}

/// Sink that discards everything. Default for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_loop(&mut self, _track: &str) {}
    fn stop(&mut self) {}
    fn play_cue(&mut self, _cue: &str) {}
}
