//! In-memory engine for tests and headless environments
//!
//! Deterministic stand-in for the native pair. Both halves expose an
//! `Arc<Mutex<_>>` record handle so tests can assert on what the bridge
//! actually applied.

use crate::speech::engine::{AudioClip, AudioPlayer, PlayerState, StateListener, Synthesizer};
use crate::voice::Voice;
use crate::{BridgeError, Result};
use std::sync::{Arc, Mutex};

/// Everything the mock synthesizer has been asked to do
#[derive(Debug, Default)]
pub struct SynthRecord {
    pub applied_voice: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub synthesized: Vec<String>,
    /// Force `apply_voice` to fail with a platform error
    pub fail_apply_voice: bool,
    /// Force `synthesize` to fail with a platform error
    pub fail_synthesize: bool,
}

pub struct MockSynthesizer {
    voices: Vec<Voice>,
    record: Arc<Mutex<SynthRecord>>,
}

impl MockSynthesizer {
    pub fn new(voices: Vec<Voice>) -> (Self, Arc<Mutex<SynthRecord>>) {
        let record = Arc::new(Mutex::new(SynthRecord::default()));
        (
            Self {
                voices,
                record: Arc::clone(&record),
            },
            record,
        )
    }
}

impl Synthesizer for MockSynthesizer {
    fn voices(&self) -> Result<Vec<Voice>> {
        Ok(self.voices.clone())
    }

    fn apply_voice(&mut self, voice: &Voice) -> Result<()> {
        let mut record = self.record.lock().unwrap();
        if record.fail_apply_voice {
            return Err(BridgeError::Platform("mock voice failure".to_string()));
        }
        record.applied_voice = Some(voice.id.clone());
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.record.lock().unwrap().rate = Some(rate);
        Ok(())
    }

    fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        self.record.lock().unwrap().pitch = Some(pitch);
        Ok(())
    }

    fn synthesize(&mut self, text: &str) -> Result<AudioClip> {
        let mut record = self.record.lock().unwrap();
        if record.fail_synthesize {
            return Err(BridgeError::Platform("mock synthesis failure".to_string()));
        }
        record.synthesized.push(text.to_string());
        Ok(AudioClip::from_text(text))
    }
}

/// Everything the mock player has been asked to do
#[derive(Debug)]
pub struct PlayerRecord {
    pub loaded: Option<String>,
    pub volume: Option<f32>,
    pub autoplay: bool,
    pub plays: u32,
    pub pauses: u32,
    /// Whether the player claims pause support
    pub can_pause: bool,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            loaded: None,
            volume: None,
            autoplay: false,
            plays: 0,
            pauses: 0,
            can_pause: true,
        }
    }
}

pub struct MockPlayer {
    record: Arc<Mutex<PlayerRecord>>,
    listener: Option<StateListener>,
}

impl MockPlayer {
    pub fn new() -> (Self, Arc<Mutex<PlayerRecord>>) {
        let record = Arc::new(Mutex::new(PlayerRecord::default()));
        (
            Self {
                record: Arc::clone(&record),
                listener: None,
            },
            record,
        )
    }

    fn notify(&mut self, state: PlayerState) {
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }
}

impl AudioPlayer for MockPlayer {
    fn load(&mut self, clip: AudioClip) -> Result<()> {
        self.record.lock().unwrap().loaded = Some(clip.text().to_string());
        self.notify(PlayerState::Opening);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.record.lock().unwrap().plays += 1;
        self.notify(PlayerState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record.lock().unwrap().pauses += 1;
        self.notify(PlayerState::Paused);
        Ok(())
    }

    fn can_pause(&self) -> bool {
        self.record.lock().unwrap().can_pause
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.record.lock().unwrap().volume = Some(volume);
        Ok(())
    }

    fn set_autoplay(&mut self, autoplay: bool) {
        self.record.lock().unwrap().autoplay = autoplay;
    }

    fn set_state_listener(&mut self, listener: StateListener) {
        self.listener = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::Gender;

    #[test]
    fn test_synth_records_operations() {
        let voices = vec![Voice::new("v1", "One", "en-US", Gender::Male)];
        let (mut synth, record) = MockSynthesizer::new(voices.clone());

        synth.apply_voice(&voices[0]).unwrap();
        synth.set_rate(1.5).unwrap();
        synth.set_pitch(0.8).unwrap();
        synth.synthesize("hello").unwrap();

        let record = record.lock().unwrap();
        assert_eq!(record.applied_voice.as_deref(), Some("v1"));
        assert_eq!(record.rate, Some(1.5));
        assert_eq!(record.pitch, Some(0.8));
        assert_eq!(record.synthesized, vec!["hello"]);
    }

    #[test]
    fn test_player_notifies_listener() {
        let (mut player, record) = MockPlayer::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        player.set_state_listener(Box::new(move |state| {
            seen_clone.lock().unwrap().push(state);
        }));

        player.load(AudioClip::from_text("hi")).unwrap();
        player.play().unwrap();
        player.pause().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![PlayerState::Opening, PlayerState::Playing, PlayerState::Paused]
        );
        assert_eq!(record.lock().unwrap().loaded.as_deref(), Some("hi"));
    }
}
