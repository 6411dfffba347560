//! The per-lane scheduler: busy-waits on the session clock and drives one key.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{PollStrategy, SessionOptions};
use crate::jitter::bell_curve_offset_ms;
use crate::model::partition::Lane;
use crate::player::schedule::schedule_object;
use crate::session::context::SessionContext;
use crate::traits::key_sink::KeySink;
use crate::traits::time::TimeProvider;

/// How a lane finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneOutcome {
    /// Every object in the lane was played.
    Completed,
    /// The cancellation flag was observed; the lane exited early.
    Aborted,
}

/// Plays one lane's note sequence against the shared session clock.
///
/// Each player captures its own epoch from the shared clock when it starts
/// running, so all lanes measure elapsed time from the same time base and
/// cannot drift apart. Waiting is a polling loop, not a sleep: timing
/// accuracy is paramount and sleep granularity is too coarse. The loop has no
/// recoverable errors; the only early exit is cooperative cancellation,
/// checked on every poll.
pub struct LanePlayer<'a> {
    lane: &'a Lane,
    ctx: &'a SessionContext,
    sink: &'a dyn KeySink,
    clock: &'a dyn TimeProvider,
    enable_keys: bool,
    start_adjustment_ms: i64,
    poll: PollStrategy,
}

impl<'a> LanePlayer<'a> {
    pub fn new(
        lane: &'a Lane,
        ctx: &'a SessionContext,
        sink: &'a dyn KeySink,
        clock: &'a dyn TimeProvider,
        options: &SessionOptions,
    ) -> Self {
        Self {
            lane,
            ctx,
            sink,
            clock,
            enable_keys: options.enable_keys,
            start_adjustment_ms: options.start_adjustment_ms,
            poll: options.poll,
        }
    }

    /// Play the lane to completion or until cancelled.
    pub fn run(self) -> LaneOutcome {
        let epoch_us = self.clock.now_us();
        // Hot per-note draws; the small non-crypto generator is plenty here.
        let mut rng = SmallRng::from_entropy();

        for (i, obj) in self.lane.objects.iter().enumerate() {
            if self.ctx.is_stopped() {
                return LaneOutcome::Aborted;
            }

            // Tunables are re-read per object so live updates apply on the
            // next note at the latest.
            let amplitude_ms = self.ctx.jitter_amplitude_ms();
            let press_jitter_ms = bell_curve_offset_ms(&mut rng, amplitude_ms);
            let release_jitter_ms = bell_curve_offset_ms(&mut rng, amplitude_ms);

            let schedule = schedule_object(
                obj,
                self.lane.objects.get(i + 1),
                self.start_adjustment_ms,
                self.ctx.timing_shift_ms(),
                press_jitter_ms,
                release_jitter_ms,
            );

            if !self.wait_until(epoch_us, schedule.press_ms) {
                return LaneOutcome::Aborted;
            }
            if self.enable_keys {
                self.sink.key_down(self.lane.key);
                self.ctx.mark_pressed(self.lane.index);
            }

            if !self.wait_until(epoch_us, schedule.release_ms) {
                // The key may still be down here. Exactly one of this player
                // and the stop path claims the pressed flag and emits the
                // key-up.
                if self.enable_keys && self.ctx.take_pressed(self.lane.index) {
                    self.sink.key_up(self.lane.key);
                }
                return LaneOutcome::Aborted;
            }
            if self.enable_keys && self.ctx.take_pressed(self.lane.index) {
                self.sink.key_up(self.lane.key);
            }
        }

        LaneOutcome::Completed
    }

    /// Poll the clock until `target_ms` past the epoch. Returns false if the
    /// cancellation flag was observed first. Targets already in the past
    /// pass on the first poll.
    fn wait_until(&self, epoch_us: i64, target_ms: i64) -> bool {
        let target_us = target_ms.saturating_mul(1000);
        loop {
            if self.ctx.is_stopped() {
                return false;
            }
            if self.clock.now_us() - epoch_us >= target_us {
                return true;
            }
            match self.poll {
                PollStrategy::Spin => std::hint::spin_loop(),
                PollStrategy::Yield => std::thread::yield_now(),
                PollStrategy::Sleep(interval) => std::thread::sleep(interval),
            }
        }
    }
}
