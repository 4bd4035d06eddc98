//! tts-bridge - native text-to-speech bridge module
//!
//! Exposes the platform's speech engine to a host runtime through a small
//! fixed RPC surface (voice/rate/pitch/language selection, voice
//! enumeration, speak/pause/resume/stop) and relays playback lifecycle
//! events (`tts-start`, `tts-finish`) back to registered listeners.

pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod params;
pub mod speech;
pub mod voice;

pub use bridge::{TtsBridge, MODULE_NAME};
pub use error::{BridgeError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "ttsbridge";
