//! Error types for the TTS bridge

use std::io;
use thiserror::Error;

/// Main error type for bridge operations
///
/// Every RPC failure surfaces as exactly one of these, with a short
/// human-readable message. Nothing is retried; recovery belongs to the
/// caller.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<String> for BridgeError {
    fn from(s: String) -> Self {
        BridgeError::Other(s)
    }
}

impl From<&str> for BridgeError {
    fn from(s: &str) -> Self {
        BridgeError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::InvalidArgument(format!("JSON error: {}", e))
    }
}
