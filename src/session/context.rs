//! Shared session state: live tunables, cancellation, per-lane key bookkeeping.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU16, Ordering};

use crate::model::note::{Key, MAX_LANES};
use crate::model::partition::Lane;

/// Per-lane key bookkeeping.
///
/// `pressed` has one writer in steady state (the lane's own player); the
/// controller also clears it while force-releasing during a stop. Transitions
/// go through `swap`, so even that race yields exactly one key-up and never a
/// duplicate.
#[derive(Default)]
struct KeySlot {
    /// Bound virtual-key code; 0 = lane unbound this session.
    code: AtomicU16,
    pressed: AtomicBool,
}

/// State shared by the controller and every lane player of a session.
///
/// The stop flag and the two tunables are lock-free and eventually
/// consistent: a stale read costs at most one event scheduled with the
/// previous value.
pub struct SessionContext {
    stop: AtomicBool,
    timing_shift_ms: AtomicI64,
    jitter_amplitude_ms: AtomicI64,
    keys: [KeySlot; MAX_LANES],
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            timing_shift_ms: AtomicI64::new(0),
            jitter_amplitude_ms: AtomicI64::new(0),
            keys: Default::default(),
        }
    }

    /// Bind this session's lanes, clearing any previous bindings and any
    /// leftover pressed bookkeeping.
    pub fn bind_keys(&self, lanes: &[Lane]) {
        for (index, slot) in self.keys.iter().enumerate() {
            let code = lanes
                .iter()
                .find(|lane| lane.index == index)
                .map_or(0, |lane| lane.key.0);
            slot.code.store(code, Ordering::Release);
            slot.pressed.store(false, Ordering::Release);
        }
    }

    /// Key bound to `lane_index`, if any.
    pub fn key(&self, lane_index: usize) -> Option<Key> {
        let code = self.keys.get(lane_index)?.code.load(Ordering::Acquire);
        (code != 0).then_some(Key(code))
    }

    /// Record that the lane's key went down.
    pub fn mark_pressed(&self, lane_index: usize) {
        if let Some(slot) = self.keys.get(lane_index) {
            slot.pressed.store(true, Ordering::Release);
        }
    }

    /// Claim the lane's pressed state. Returns true for exactly one caller
    /// per press, which is then responsible for emitting the key-up.
    pub fn take_pressed(&self, lane_index: usize) -> bool {
        self.keys
            .get(lane_index)
            .is_some_and(|slot| slot.pressed.swap(false, Ordering::AcqRel))
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn set_stopped(&self, value: bool) {
        self.stop.store(value, Ordering::Relaxed);
    }

    pub fn timing_shift_ms(&self) -> i64 {
        self.timing_shift_ms.load(Ordering::Relaxed)
    }

    pub fn set_timing_shift_ms(&self, ms: i64) {
        self.timing_shift_ms.store(ms, Ordering::Relaxed);
    }

    pub fn jitter_amplitude_ms(&self) -> i64 {
        self.jitter_amplitude_ms.load(Ordering::Relaxed)
    }

    pub fn set_jitter_amplitude_ms(&self, ms: i64) {
        self.jitter_amplitude_ms.store(ms, Ordering::Relaxed);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::note::HitObject;

    fn lane(index: usize, key: Key) -> Lane {
        Lane {
            index,
            position: 64,
            key,
            objects: Vec::<HitObject>::new(),
        }
    }

    #[test]
    fn test_bind_keys_clears_stale_slots() {
        let ctx = SessionContext::new();
        ctx.bind_keys(&[lane(0, Key::D), lane(1, Key::F)]);
        ctx.mark_pressed(1);

        ctx.bind_keys(&[lane(0, Key::SPACE)]);
        assert_eq!(ctx.key(0), Some(Key::SPACE));
        assert_eq!(ctx.key(1), None);
        assert!(!ctx.take_pressed(1));
    }

    #[test]
    fn test_take_pressed_claims_once() {
        let ctx = SessionContext::new();
        ctx.bind_keys(&[lane(0, Key::D)]);
        ctx.mark_pressed(0);

        assert!(ctx.take_pressed(0));
        assert!(!ctx.take_pressed(0));
    }

    #[test]
    fn test_tunables_round_trip() {
        let ctx = SessionContext::new();
        ctx.set_timing_shift_ms(-12);
        ctx.set_jitter_amplitude_ms(30);
        assert_eq!(ctx.timing_shift_ms(), -12);
        assert_eq!(ctx.jitter_amplitude_ms(), 30);
    }

    #[test]
    fn test_out_of_range_lane_index_is_harmless() {
        let ctx = SessionContext::new();
        ctx.mark_pressed(42);
        assert!(!ctx.take_pressed(42));
        assert_eq!(ctx.key(42), None);
    }
}
