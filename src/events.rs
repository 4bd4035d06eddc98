//! Lifecycle event relay
//!
//! Forwards player state transitions to registered listeners as the four
//! named bridge events. Only `tts-start` and `tts-finish` are ever emitted;
//! `tts-error` and `tts-cancel` exist in the contract for callers that
//! declare handlers, but no code path fires them.

use crate::speech::engine::PlayerState;
use log::debug;
use std::sync::Mutex;

/// The four lifecycle events of the external contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Finish,
    /// Declared but never emitted
    Error,
    /// Declared but never emitted
    Cancel,
}

impl EventKind {
    /// Wire name of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "tts-start",
            EventKind::Finish => "tts-finish",
            EventKind::Error => "tts-error",
            EventKind::Cancel => "tts-cancel",
        }
    }
}

/// One emitted lifecycle event
#[derive(Debug, Clone, PartialEq)]
pub struct TtsEvent {
    pub kind: EventKind,
    /// Opaque id of the playback session the event belongs to
    pub utterance_id: String,
}

/// Listener callback; invoked for every event passing its filter
pub type EventCallback = Box<dyn Fn(&TtsEvent) + Send>;

struct Listener {
    id: u64,
    /// `None` receives every event
    kind: Option<EventKind>,
    callback: EventCallback,
}

struct RelayInner {
    listeners: Vec<Listener>,
    next_listener_id: u64,
    /// Utterance id of the session currently owning the player
    current_session: Option<String>,
}

/// Observes player transitions and emits lifecycle events
///
/// Shared between the bridge (listener registration) and the player's
/// callback thread (state notifications), hence the internal mutex.
pub struct EventRelay {
    inner: Mutex<RelayInner>,
}

impl EventRelay {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RelayInner {
                listeners: Vec::new(),
                next_listener_id: 1,
                current_session: None,
            }),
        }
    }

    /// Register a listener, optionally filtered to one event kind
    ///
    /// Returns a stable id for [`remove_listener`](Self::remove_listener).
    pub fn add_listener(&self, kind: Option<EventKind>, callback: EventCallback) -> u64 {
        let mut inner = self.inner.lock().expect("relay lock poisoned");
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push(Listener { id, kind, callback });
        id
    }

    /// Remove a previously registered listener; unknown ids are ignored
    pub fn remove_listener(&self, id: u64) {
        let mut inner = self.inner.lock().expect("relay lock poisoned");
        inner.listeners.retain(|l| l.id != id);
    }

    /// Mark `utterance_id` as the session owning subsequent transitions
    pub fn begin_session(&self, utterance_id: String) {
        let mut inner = self.inner.lock().expect("relay lock poisoned");
        inner.current_session = Some(utterance_id);
    }

    /// Map one player transition to at most one event
    ///
    /// Opening and Buffering are intentionally suppressed.
    pub fn observe(&self, state: PlayerState) {
        let kind = match state {
            PlayerState::Opening | PlayerState::Buffering => return,
            PlayerState::Playing => EventKind::Start,
            PlayerState::Paused => EventKind::Finish,
        };
        self.emit(kind);
    }

    fn emit(&self, kind: EventKind) {
        let inner = self.inner.lock().expect("relay lock poisoned");
        let utterance_id = match inner.current_session {
            Some(ref id) => id.clone(),
            // No session has been started; nothing to attribute the event to.
            None => return,
        };

        let event = TtsEvent { kind, utterance_id };
        debug!("Emitting {} for utterance {}", kind.as_str(), event.utterance_id);

        for listener in inner.listeners.iter() {
            if listener.kind.map_or(true, |k| k == kind) {
                (listener.callback)(&event);
            }
        }
    }
}

impl Default for EventRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn collecting_relay(kind: Option<EventKind>) -> (EventRelay, mpsc::Receiver<TtsEvent>) {
        let relay = EventRelay::new();
        let (tx, rx) = mpsc::channel();
        relay.add_listener(kind, Box::new(move |ev| {
            let _ = tx.send(ev.clone());
        }));
        (relay, rx)
    }

    #[test]
    fn test_playing_emits_start_once() {
        let (relay, rx) = collecting_relay(None);
        relay.begin_session("7".to_string());
        relay.observe(PlayerState::Playing);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::Start);
        assert_eq!(event.utterance_id, "7");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_paused_emits_finish() {
        let (relay, rx) = collecting_relay(None);
        relay.begin_session("3".to_string());
        relay.observe(PlayerState::Paused);

        assert_eq!(rx.try_recv().unwrap().kind, EventKind::Finish);
    }

    #[test]
    fn test_opening_and_buffering_suppressed() {
        let (relay, rx) = collecting_relay(None);
        relay.begin_session("1".to_string());
        relay.observe(PlayerState::Opening);
        relay.observe(PlayerState::Buffering);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_event_without_session() {
        let (relay, rx) = collecting_relay(None);
        relay.observe(PlayerState::Playing);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_kind_filter() {
        let (relay, rx) = collecting_relay(Some(EventKind::Finish));
        relay.begin_session("2".to_string());
        relay.observe(PlayerState::Playing);
        relay.observe(PlayerState::Paused);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::Finish);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_remove_listener() {
        let relay = EventRelay::new();
        let (tx, rx) = mpsc::channel();
        let id = relay.add_listener(None, Box::new(move |ev| {
            let _ = tx.send(ev.clone());
        }));

        relay.remove_listener(id);
        relay.begin_session("9".to_string());
        relay.observe(PlayerState::Playing);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::Start.as_str(), "tts-start");
        assert_eq!(EventKind::Finish.as_str(), "tts-finish");
        assert_eq!(EventKind::Error.as_str(), "tts-error");
        assert_eq!(EventKind::Cancel.as_str(), "tts-cancel");
    }
}
