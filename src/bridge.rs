//! Bridge module surface
//!
//! [`TtsBridge`] is the callable module a host runtime registers under
//! [`MODULE_NAME`]. The typed methods are the real surface; [`TtsBridge::call`]
//! is the registration shim that maps the host's positional-JSON RPC calls
//! onto them and renders results back as JSON.

use crate::config::BridgeConfig;
use crate::events::{EventCallback, EventKind, EventRelay};
use crate::params;
use crate::speech::{create_engine, AudioPlayer, PlaybackController, PlaybackState, Synthesizer};
use crate::voice::Voice;
use crate::{BridgeError, Result};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Name the host runtime registers this module under
pub const MODULE_NAME: &str = "TextToSpeech";

/// One bridge-module instance: a synthesizer, a player, and the event relay
///
/// Callers serialize calls; the only internal locking protects the relay's
/// listener table, which real engines invoke from callback threads.
pub struct TtsBridge {
    synthesizer: Box<dyn Synthesizer>,
    controller: PlaybackController,
}

impl TtsBridge {
    /// Create a bridge over the platform's native engine
    pub fn new() -> Result<Self> {
        let (synthesizer, player) = create_engine()?;
        Ok(Self::with_engine(synthesizer, player))
    }

    /// Create a bridge over an explicit engine pair
    pub fn with_engine(
        synthesizer: Box<dyn Synthesizer>,
        player: Box<dyn AudioPlayer>,
    ) -> Self {
        Self {
            synthesizer,
            controller: PlaybackController::new(player),
        }
    }

    /// Apply configured defaults, best-effort
    ///
    /// Lookup misses and platform refusals are logged, never fatal; a bad
    /// config entry must not take the whole module down.
    pub fn apply_config(&mut self, config: &BridgeConfig) {
        if let Some(voice) = config.voice() {
            if let Err(e) = self.set_default_voice(&voice) {
                warn!("Configured voice {:?} not applied: {}", voice, e);
            }
        }
        if let Some(language) = config.language() {
            if let Err(e) = self.set_default_language(&language) {
                warn!("Configured language {:?} not applied: {}", language, e);
            }
        }
        if let Some(rate) = config.rate() {
            if let Err(e) = self.set_default_rate(rate, config.skip_rate_transform()) {
                warn!("Configured rate {} not applied: {}", rate, e);
            }
        }
        if let Some(pitch) = config.pitch() {
            if let Err(e) = self.set_default_pitch(pitch) {
                warn!("Configured pitch {} not applied: {}", pitch, e);
            }
        }
    }

    /// Select the synthesizer's voice by id or display name
    pub fn set_default_voice(&mut self, key: &str) -> Result<()> {
        let voices = self.synthesizer.voices()?;
        let voice = params::find_voice(&voices, key)
            .ok_or_else(|| BridgeError::NotFound("The selected voice was not found".to_string()))?
            .clone();

        self.synthesizer.apply_voice(&voice).map_err(|e| {
            debug!("Applying voice {} failed: {}", voice.id, e);
            BridgeError::Platform("Error setting selected voice".to_string())
        })
    }

    /// Select the synthesizer's voice by exact language tag
    pub fn set_default_language(&mut self, language: &str) -> Result<()> {
        let voices = self.synthesizer.voices()?;
        let voice = params::find_voice_for_language(&voices, language)
            .ok_or_else(|| BridgeError::NotFound("The selected voice was not found".to_string()))?
            .clone();

        self.synthesizer.apply_voice(&voice).map_err(|e| {
            debug!("Applying voice {} failed: {}", voice.id, e);
            BridgeError::Platform("Error setting selected voice".to_string())
        })
    }

    /// Set the speaking rate, optionally bypassing the normalized transform
    pub fn set_default_rate(&mut self, rate: f32, skip_transform: bool) -> Result<()> {
        let resolved = params::resolve_rate(rate, skip_transform)?;
        self.synthesizer.set_rate(resolved)
    }

    pub fn set_default_pitch(&mut self, pitch: f32) -> Result<()> {
        let validated = params::validate_pitch(pitch)?;
        self.synthesizer.set_pitch(validated)
    }

    /// Enumerate installed voices in native catalog order
    pub fn voices(&self) -> Result<Vec<Voice>> {
        self.synthesizer.voices()
    }

    /// Speak `text`, returning the utterance id carried by its events
    pub fn speak(&mut self, text: &str) -> Result<String> {
        self.controller.speak(self.synthesizer.as_mut(), text)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.controller.pause()
    }

    pub fn resume(&mut self) -> Result<()> {
        self.controller.resume()
    }

    pub fn stop(&mut self) -> Result<()> {
        self.controller.stop()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    /// Register a lifecycle-event listener; `None` receives every event
    pub fn add_listener(&self, kind: Option<EventKind>, callback: EventCallback) -> u64 {
        self.controller.relay().add_listener(kind, callback)
    }

    pub fn remove_listener(&self, id: u64) {
        self.controller.relay().remove_listener(id);
    }

    /// The relay emitting this bridge's lifecycle events
    pub fn relay(&self) -> &Arc<EventRelay> {
        self.controller.relay()
    }

    /// Dispatch one RPC call with positional JSON arguments
    ///
    /// Mutating calls resolve to the literal `"success"`; `voices` resolves
    /// to the serialized catalog.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        debug!("Dispatching {}.{}", MODULE_NAME, method);

        match method {
            "setDefaultVoice" => {
                let key = str_arg(args, 0, "voiceId")?;
                self.set_default_voice(key)?;
                Ok(success())
            }
            "setDefaultRate" => {
                let rate = num_arg(args, 0, "rate")? as f32;
                let skip_transform = opt_bool_arg(args, 1).unwrap_or(false);
                self.set_default_rate(rate, skip_transform)?;
                Ok(success())
            }
            "setDefaultPitch" => {
                let pitch = num_arg(args, 0, "pitch")? as f32;
                self.set_default_pitch(pitch)?;
                Ok(success())
            }
            "setDefaultLanguage" => {
                let language = str_arg(args, 0, "language")?;
                self.set_default_language(language)?;
                Ok(success())
            }
            "voices" => Ok(serde_json::to_value(self.voices()?)?),
            "speak" => {
                let text = str_arg(args, 0, "utterance")?;
                self.speak(text)?;
                Ok(success())
            }
            "stop" => {
                self.stop()?;
                Ok(success())
            }
            "pause" => {
                self.pause()?;
                Ok(success())
            }
            "resume" => {
                self.resume()?;
                Ok(success())
            }
            _ => Err(BridgeError::NotFound(format!("Unknown method: {}", method))),
        }
    }
}

fn success() -> Value {
    Value::String("success".to_string())
}

fn str_arg<'a>(args: &'a [Value], idx: usize, name: &str) -> Result<&'a str> {
    args.get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing {} argument", name)))
}

fn num_arg(args: &[Value], idx: usize, name: &str) -> Result<f64> {
    args.get(idx)
        .and_then(Value::as_f64)
        .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing {} argument", name)))
}

fn opt_bool_arg(args: &[Value], idx: usize) -> Option<bool> {
    args.get(idx).and_then(Value::as_bool)
}
