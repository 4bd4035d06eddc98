//! Engine backends

// Production backend over the tts crate's native bindings
pub mod native;

// Deterministic in-memory backend for tests and headless environments
pub mod mock;
