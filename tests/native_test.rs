//! Native engine smoke tests
//!
//! These touch the real platform engine and tolerate environments without
//! one (CI, headless containers); they print and continue instead of
//! failing when no engine is available.

use tts_bridge::bridge::TtsBridge;
use tts_bridge::voice::VOICE_QUALITY;

#[test]
fn test_create_native_bridge() {
    match TtsBridge::new() {
        Ok(bridge) => {
            println!("✓ Native bridge created");
            drop(bridge);
        }
        Err(e) => {
            println!("⚠ Native engine unavailable (may be expected in CI): {}", e);
        }
    }
}

#[test]
fn test_native_voice_catalog() {
    let bridge = match TtsBridge::new() {
        Ok(bridge) => bridge,
        Err(e) => {
            println!("⚠ Skipping voice catalog test (no engine): {}", e);
            return;
        }
    };

    match bridge.voices() {
        Ok(voices) => {
            for voice in &voices {
                assert!(!voice.id.is_empty(), "voice id must be non-empty");
                assert!(!voice.language.is_empty(), "voice language must be non-empty");
                assert_eq!(voice.quality, VOICE_QUALITY);
            }
            println!("✓ Enumerated {} voices", voices.len());
        }
        Err(e) => println!("⚠ Voice enumeration failed (may be expected): {}", e),
    }
}

#[test]
fn test_native_parameter_setting() {
    let mut bridge = match TtsBridge::new() {
        Ok(bridge) => bridge,
        Err(e) => {
            println!("⚠ Skipping parameter test (no engine): {}", e);
            return;
        }
    };

    // Unsupported capabilities warn and succeed, so these should never fail
    // on a working engine.
    assert!(bridge.set_default_rate(1.0, true).is_ok());
    assert!(bridge.set_default_rate(0.5, false).is_ok());
    assert!(bridge.set_default_pitch(1.0).is_ok());

    // Validation errors are platform-independent
    assert!(bridge.set_default_rate(10.0, true).is_err());
    assert!(bridge.set_default_pitch(3.0).is_err());
}
