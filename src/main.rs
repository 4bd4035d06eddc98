//! CLI shim around the bridge module
//!
//! Stands in for a host runtime: builds the bridge over the native engine,
//! applies configured defaults, dispatches one RPC call from the command
//! line, and prints lifecycle events as JSON lines as they arrive.
//!
//! Usage: `ttsbridge [--debug] <method> [args...]`
//! Arguments are parsed as JSON where possible, raw strings otherwise, e.g.
//! `ttsbridge setDefaultRate 0.75 true` or `ttsbridge speak "hello world"`.

use log::{error, info, warn};
use serde_json::{json, Value};
use std::process;
use std::sync::mpsc;
use std::time::Duration;
use tts_bridge::config::BridgeConfig;
use tts_bridge::events::EventKind;
use tts_bridge::{Result, TtsBridge};

/// How long to wait for playback to finish after a speak call
const FINISH_TIMEOUT: Duration = Duration::from_secs(60);

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");
    args.retain(|arg| arg != "--debug" && arg != "-d");

    if debug_mode {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if args.is_empty() {
        eprintln!("Usage: {} [--debug] <method> [args...]", tts_bridge::APP_NAME);
        eprintln!("Methods: setDefaultVoice, setDefaultRate, setDefaultPitch,");
        eprintln!("         setDefaultLanguage, voices, speak, stop, pause, resume");
        process::exit(2);
    }

    if let Err(e) = run(&args) {
        error!("Fatal error: {}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let method = &args[0];
    let call_args: Vec<Value> = args[1..]
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone())))
        .collect();

    info!("{} version {} starting", tts_bridge::APP_NAME, tts_bridge::VERSION);

    let mut bridge = TtsBridge::new()?;

    match BridgeConfig::load() {
        Ok(config) => bridge.apply_config(&config),
        Err(e) => warn!("Config not loaded: {}", e),
    }

    let (tx, rx) = mpsc::channel();
    bridge.add_listener(
        None,
        Box::new(move |event| {
            let _ = tx.send(event.clone());
        }),
    );

    let result = bridge.call(method, &call_args)?;
    println!("{}", result);

    // Playback runs on the engine's own thread; hold the process open until
    // the finish event arrives so the utterance is actually heard.
    if method == "speak" {
        loop {
            match rx.recv_timeout(FINISH_TIMEOUT) {
                Ok(event) => {
                    println!(
                        "{}",
                        json!({ "event": event.kind.as_str(), "utteranceId": event.utterance_id })
                    );
                    if event.kind == EventKind::Finish {
                        break;
                    }
                }
                Err(_) => {
                    warn!("Timed out waiting for playback to finish");
                    break;
                }
            }
        }
    }

    Ok(())
}
