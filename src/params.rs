//! Synthesis parameter mapping
//!
//! Validates and transforms caller-supplied rate/pitch/voice/language values
//! into what the native engine accepts. Rates are multipliers of the voice's
//! normal speaking rate (1.0 = normal); pitch likewise (1.0 = normal).

use crate::voice::Voice;
use crate::{BridgeError, Result};

/// Lowest rate the engine accepts directly (half the normal rate)
pub const MIN_RATE: f32 = 0.5;
/// Highest rate the engine accepts directly (six times the normal rate)
pub const MAX_RATE: f32 = 6.0;
/// Input value at which the rate transform changes slope
pub const RATE_BREAKPOINT: f32 = 0.5;

pub const MIN_PITCH: f32 = 0.0;
pub const MAX_PITCH: f32 = 2.0;

/// Map a normalized caller rate onto the engine's rate scale
///
/// The caller scale treats 0.5 as "normal speed". Below the breakpoint the
/// map runs linearly through (0, 0) and (0.5, 1.0); at and above it, through
/// (0.5, 1.0) and (1.0, 6.0). Continuous and monotonic on [0, 1] -> [0, 6].
///
/// No bounds check here: inputs outside [0, 1] extrapolate along the same
/// lines, and backends clamp to the platform range when applying.
pub fn transform_rate(rate: f32) -> f32 {
    if rate < RATE_BREAKPOINT {
        rate * 2.0
    } else {
        1.0 + (rate - RATE_BREAKPOINT) * (MAX_RATE - 1.0) / (1.0 - RATE_BREAKPOINT)
    }
}

/// Resolve a caller rate to the value applied to the engine
///
/// With `skip_transform` the rate is taken as an engine-scale value and must
/// lie in [[`MIN_RATE`], [`MAX_RATE`]]; otherwise it goes through
/// [`transform_rate`] unvalidated.
pub fn resolve_rate(rate: f32, skip_transform: bool) -> Result<f32> {
    if skip_transform {
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            return Err(BridgeError::InvalidArgument(
                "Failure caused by an invalid rate".to_string(),
            ));
        }
        return Ok(rate);
    }

    Ok(transform_rate(rate))
}

/// Validate a pitch value
///
/// Pitch ranges from 0.0 (lowest) to 2.0 (highest) inclusive, 1.0 normal.
pub fn validate_pitch(pitch: f32) -> Result<f32> {
    if !(MIN_PITCH..=MAX_PITCH).contains(&pitch) {
        return Err(BridgeError::InvalidArgument(
            "Failure caused by an invalid pitch".to_string(),
        ));
    }
    Ok(pitch)
}

/// Find a voice by id or display name; first match wins
pub fn find_voice<'a>(voices: &'a [Voice], key: &str) -> Option<&'a Voice> {
    voices.iter().find(|v| v.id == key || v.name == key)
}

/// Find the first voice with an exact language-tag match
pub fn find_voice_for_language<'a>(voices: &'a [Voice], language: &str) -> Option<&'a Voice> {
    voices.iter().find(|v| v.language == language)
}
