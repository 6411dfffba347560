use std::sync::Arc;
use std::sync::Mutex;

use crate::model::note::Key;
use crate::traits::time::TimeProvider;

/// One emitted key transition, as observed by a recording sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// true = pressed, false = released.
    pub pressed: bool,
    /// Timestamp in microseconds from the session clock.
    pub time_us: i64,
}

/// Abstraction over the key-injection primitive.
/// Implementations: the host's OS-level injector (production),
/// NullKeySink / RecordingKeySink (testing and dry runs).
///
/// Fire-and-forget: calls must not block the scheduling hot path and have no
/// return value. Called concurrently from every lane thread.
pub trait KeySink: Send + Sync {
    fn key_down(&self, key: Key);
    fn key_up(&self, key: Key);
}

/// Sink that discards every event.
pub struct NullKeySink;

impl KeySink for NullKeySink {
    fn key_down(&self, _key: Key) {}
    fn key_up(&self, _key: Key) {}
}

/// Sink that records every event with a clock timestamp, for tests.
pub struct RecordingKeySink {
    clock: Arc<dyn TimeProvider>,
    events: Mutex<Vec<KeyEvent>>,
}

impl RecordingKeySink {
    pub fn new(clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            clock,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<KeyEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, key: Key, pressed: bool) {
        let event = KeyEvent {
            key,
            pressed,
            time_us: self.clock.now_us(),
        };
        self.events.lock().unwrap().push(event);
    }
}

impl KeySink for RecordingKeySink {
    fn key_down(&self, key: Key) {
        self.record(key, true);
    }

    fn key_up(&self, key: Key) {
        self.record(key, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::time::MockTimeProvider;

    #[test]
    fn test_recording_sink_stamps_events() {
        let clock = Arc::new(MockTimeProvider::new());
        let sink = RecordingKeySink::new(clock.clone());

        clock.set_time(1_000_000);
        sink.key_down(Key::F);
        clock.set_time(1_050_000);
        sink.key_up(Key::F);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            KeyEvent {
                key: Key::F,
                pressed: true,
                time_us: 1_000_000
            }
        );
        assert_eq!(
            events[1],
            KeyEvent {
                key: Key::F,
                pressed: false,
                time_us: 1_050_000
            }
        );
    }
}
