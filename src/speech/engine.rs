//! Native engine seam
//!
//! Two traits mirror the native pair the bridge drives: a speech
//! synthesizer that turns text into an audio clip, and an audio player that
//! plays the clip and reports state transitions. Splitting them keeps the
//! playback state machine testable without a real engine.

use crate::voice::Voice;
use crate::Result;
use log::info;

/// Opaque handle to one synthesized utterance
///
/// Some engines synthesize to a real stream, others (the `tts` crate path)
/// fuse synthesis and playback into a single call; the clip carries whatever
/// the backend pair needs to hand from one side to the other.
#[derive(Debug, Clone)]
pub struct AudioClip {
    text: String,
}

impl AudioClip {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Player state as observed by the event relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Source attached, not yet decodable
    Opening,
    /// Waiting on data
    Buffering,
    Playing,
    Paused,
}

/// Callback invoked on every player state transition
///
/// Real backends call this from engine callback threads.
pub type StateListener = Box<dyn FnMut(PlayerState) + Send>;

/// Speech synthesizer half of the native pair
pub trait Synthesizer: Send {
    /// Enumerate installed voices in native catalog order
    fn voices(&self) -> Result<Vec<Voice>>;

    /// Make `voice` the synthesizer's current voice
    fn apply_voice(&mut self, voice: &Voice) -> Result<()>;

    /// Set the speaking rate (engine scale, 1.0 = normal)
    fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Set the pitch (0.0-2.0, 1.0 = normal)
    fn set_pitch(&mut self, pitch: f32) -> Result<()>;

    /// Convert text to an audio clip
    ///
    /// This is the one operation that waits on the native engine; everything
    /// else is fire-and-forget.
    fn synthesize(&mut self, text: &str) -> Result<AudioClip>;
}

/// Audio player half of the native pair
pub trait AudioPlayer: Send {
    /// Attach a synthesized clip as the player's source
    fn load(&mut self, clip: AudioClip) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Whether the player supports pausing the current source
    fn can_pause(&self) -> bool;

    /// Set playback volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    fn set_autoplay(&mut self, autoplay: bool);

    /// Install the state-transition listener (one per player)
    fn set_state_listener(&mut self, listener: StateListener);
}

/// Create the platform engine pair
///
/// Uses the `tts` crate's native bindings: AVFoundation on macOS/iOS, WinRT
/// SpeechSynthesis on Windows, Speech Dispatcher on Linux.
pub fn create_engine() -> Result<(Box<dyn Synthesizer>, Box<dyn AudioPlayer>)> {
    use super::backends::native::NativeEngine;

    info!(
        "Creating native speech engine for platform: {}",
        std::env::consts::OS
    );

    let (synth, player) = NativeEngine::create()?;
    info!("Native speech engine initialized");

    Ok((Box::new(synth), Box::new(player)))
}
