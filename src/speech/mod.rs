//! Speech synthesis and playback

pub mod backends;
pub mod engine;
pub mod playback;

pub use engine::{create_engine, AudioClip, AudioPlayer, PlayerState, StateListener, Synthesizer};
pub use playback::{PlaybackController, PlaybackState};
