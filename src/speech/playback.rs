//! Playback controller
//!
//! Owns the audio player and the lifecycle state machine:
//! Idle -> Synthesizing -> Playing <-> Paused. One utterance plays at a
//! time; each `speak` allocates a fresh utterance id from a monotonic
//! counter and hands it to the event relay as the current session.

use crate::events::EventRelay;
use crate::speech::engine::{AudioPlayer, Synthesizer};
use crate::Result;
use log::{debug, warn};
use std::sync::Arc;

/// Controller-visible playback states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// Waiting on the native engine to produce the clip
    Synthesizing,
    Playing,
    Paused,
}

/// Drives the player and tracks playback state
pub struct PlaybackController {
    player: Box<dyn AudioPlayer>,
    relay: Arc<EventRelay>,
    state: PlaybackState,
    next_utterance: u64,
}

impl PlaybackController {
    /// Wrap a player, wiring its state notifications into a fresh relay
    ///
    /// The listener is installed once here, not per utterance.
    pub fn new(mut player: Box<dyn AudioPlayer>) -> Self {
        let relay = Arc::new(EventRelay::new());

        let observer = Arc::clone(&relay);
        player.set_state_listener(Box::new(move |state| observer.observe(state)));

        Self {
            player,
            relay,
            state: PlaybackState::Idle,
            next_utterance: 1,
        }
    }

    /// The relay receiving this player's transitions
    pub fn relay(&self) -> &Arc<EventRelay> {
        &self.relay
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Synthesize `text` and start playback
    ///
    /// Synthesis is the one suspension point; once the clip exists the
    /// player is loaded with autoplay on and volume at maximum, and playback
    /// starts. Returns the utterance id carried by this session's events.
    pub fn speak(&mut self, synthesizer: &mut dyn Synthesizer, text: &str) -> Result<String> {
        self.state = PlaybackState::Synthesizing;
        debug!("Synthesizing utterance ({} chars)", text.len());

        match self.start_utterance(synthesizer, text) {
            Ok(id) => {
                self.state = PlaybackState::Playing;
                Ok(id)
            }
            Err(e) => {
                self.state = PlaybackState::Idle;
                Err(e)
            }
        }
    }

    fn start_utterance(
        &mut self,
        synthesizer: &mut dyn Synthesizer,
        text: &str,
    ) -> Result<String> {
        let clip = synthesizer.synthesize(text)?;

        let id = self.next_utterance.to_string();
        self.next_utterance += 1;
        self.relay.begin_session(id.clone());

        self.player.load(clip)?;
        self.player.set_autoplay(true);
        self.player.set_volume(1.0)?;
        self.player.play()?;

        Ok(id)
    }

    /// Pause playback if the player supports it
    ///
    /// Succeeds whether or not a pause actually happened.
    pub fn pause(&mut self) -> Result<()> {
        if self.player.can_pause() {
            if let Err(e) = self.player.pause() {
                warn!("Pause failed: {}", e);
            }
        } else {
            debug!("Player cannot pause current source");
        }
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Unconditionally issue play
    pub fn resume(&mut self) -> Result<()> {
        if let Err(e) = self.player.play() {
            warn!("Resume failed: {}", e);
        }
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Stop playback
    ///
    /// Compatibility alias for [`pause`](Self::pause); the playback
    /// position is not reset.
    pub fn stop(&mut self) -> Result<()> {
        self.pause()
    }
}
