//! Session controller: owns shared state, spawns lane players, joins them.

pub mod context;

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::config::SessionOptions;
use crate::error::ConfigError;
use crate::model::note::{HitObject, MAX_LANES};
use crate::model::partition::partition;
use crate::player::lane_player::{LaneOutcome, LanePlayer};
use crate::traits::key_sink::KeySink;
use crate::traits::time::{SystemTimeProvider, TimeProvider};

pub use context::SessionContext;

/// Summary of one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    pub lane_count: usize,
    /// Objects bucketed into a lane and scheduled.
    pub assigned: usize,
    /// Objects whose position matched no lane. Never fatal, always counted.
    pub dropped: usize,
    /// True if any lane exited through the cancellation path.
    pub aborted: bool,
}

/// Plays charts by replaying hit objects as key events, one thread per lane.
///
/// `play` blocks until the chart finishes or is cancelled. The control
/// operations (`request_stop`, the tunable setters) are safe to call from
/// other threads while a session runs.
pub struct Session {
    ctx: Arc<SessionContext>,
    sink: Arc<dyn KeySink>,
    clock: Arc<dyn TimeProvider>,
}

impl Session {
    pub fn new(sink: Arc<dyn KeySink>, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            ctx: Arc::new(SessionContext::new()),
            sink,
            clock,
        }
    }

    /// Session driven by the monotonic system clock.
    pub fn with_system_clock(sink: Arc<dyn KeySink>) -> Self {
        Self::new(sink, Arc::new(SystemTimeProvider::new()))
    }

    /// Play a chart to completion or cancellation.
    ///
    /// Partitions the objects into lanes, spawns one player thread per lane
    /// and blocks until every lane reaches a terminal state. Configuration
    /// problems are refused before any thread starts. A chart with zero
    /// lanes is a no-op; an empty lane terminates immediately.
    pub fn play(
        &self,
        objects: &[HitObject],
        options: &SessionOptions,
    ) -> Result<PlayReport, ConfigError> {
        let parts = partition(objects, options)?;

        info!(lanes = parts.lanes.len(), "detected {}K layout", parts.lanes.len());
        if parts.dropped > 0 {
            warn!(
                dropped = parts.dropped,
                "objects matched no lane and were skipped"
            );
        }

        self.ctx.set_timing_shift_ms(options.timing_shift_ms);
        self.ctx.set_jitter_amplitude_ms(options.jitter_amplitude_ms);
        self.ctx.bind_keys(&parts.lanes);
        // A stop left over from a previous session must not cancel this one.
        self.ctx.set_stopped(false);

        let mut report = PlayReport {
            lane_count: parts.lanes.len(),
            assigned: parts.assigned,
            dropped: parts.dropped,
            aborted: false,
        };
        if parts.lanes.is_empty() {
            return Ok(report);
        }

        let ctx = self.ctx.as_ref();
        let sink = self.sink.as_ref();
        let clock = self.clock.as_ref();
        let outcomes: Vec<LaneOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = parts
                .lanes
                .iter()
                .map(|lane| {
                    let player = LanePlayer::new(lane, ctx, sink, clock, options);
                    scope.spawn(move || player.run())
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(LaneOutcome::Aborted))
                .collect()
        });

        report.aborted = outcomes
            .iter()
            .any(|outcome| *outcome == LaneOutcome::Aborted);
        if report.aborted {
            info!("playback cancelled");
        } else {
            info!("all lanes completed");
        }
        Ok(report)
    }

    /// Cancel the running session and release every key still held.
    ///
    /// Idempotent: the flag set is a plain store and the force-release only
    /// fires for keys whose pressed state it claims, so a second call emits
    /// nothing. A key-down is never emitted from here.
    pub fn request_stop(&self) {
        self.ctx.set_stopped(true);
        for lane_index in 0..MAX_LANES {
            if self.ctx.take_pressed(lane_index) {
                if let Some(key) = self.ctx.key(lane_index) {
                    debug!(lane = lane_index, "force releasing held key");
                    self.sink.key_up(key);
                }
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.ctx.is_stopped()
    }

    /// Update the global timing shift; applies from the next scheduled note.
    pub fn set_timing_shift(&self, ms: i64) {
        self.ctx.set_timing_shift_ms(ms);
    }

    /// Update the jitter amplitude; applies from the next jitter draw.
    pub fn set_jitter_amplitude(&self, ms: i64) {
        self.ctx.set_jitter_amplitude_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaneCountMode;
    use crate::model::note::Key;
    use crate::traits::key_sink::RecordingKeySink;
    use crate::traits::time::MockTimeProvider;

    fn recording_session() -> (Session, Arc<RecordingKeySink>, Arc<MockTimeProvider>) {
        let clock = Arc::new(MockTimeProvider::new());
        let sink = Arc::new(RecordingKeySink::new(clock.clone()));
        let session = Session::new(sink.clone(), clock.clone());
        (session, sink, clock)
    }

    #[test]
    fn test_zero_lanes_is_a_no_op() {
        let (session, sink, _clock) = recording_session();
        let report = session.play(&[], &SessionOptions::default()).unwrap();
        assert_eq!(report.lane_count, 0);
        assert!(!report.aborted);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_config_error_spawns_nothing() {
        let (session, sink, _clock) = recording_session();
        let options = SessionOptions {
            lane_count: LaneCountMode::Fixed(10),
            ..Default::default()
        };
        let err = session
            .play(&[HitObject::tap(64, 100)], &options)
            .unwrap_err();
        assert_eq!(err, ConfigError::LaneCount(10));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (session, sink, _clock) = recording_session();
        session.request_stop();
        session.request_stop();
        assert!(session.is_stopped());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_stop_releases_only_pressed_keys() {
        let (session, sink, _clock) = recording_session();
        let lanes = [crate::model::partition::Lane {
            index: 0,
            position: 64,
            key: Key::F,
            objects: Vec::new(),
        }];
        session.ctx.bind_keys(&lanes);
        session.ctx.mark_pressed(0);

        session.request_stop();
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, Key::F);
        assert!(!events[0].pressed);

        session.request_stop();
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn test_play_resets_a_leftover_stop() {
        let (session, _sink, _clock) = recording_session();
        session.request_stop();
        assert!(session.is_stopped());
        let report = session.play(&[], &SessionOptions::default()).unwrap();
        assert!(!report.aborted);
        assert!(!session.is_stopped());
    }
}
