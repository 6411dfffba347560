//! Press/release time computation for one hit object.

use crate::model::note::HitObject;

/// How long a tap note's key stays down.
pub const TAP_DURATION_MS: i64 = 50;

/// Minimum gap enforced between a release and the next press in a lane.
pub const SAFETY_MARGIN_MS: i64 = 5;

/// Computed target times for one object, in session-relative milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub press_ms: i64,
    pub release_ms: i64,
}

/// Compute press/release times for `obj`, capped against its successor.
///
/// Press: chart time minus the start adjustment, plus jitter and the global
/// shift. Release: the hold end treated the same way, or press plus
/// [`TAP_DURATION_MS`] for taps. When the lane has a next object the release
/// is clamped to [`SAFETY_MARGIN_MS`] before that object's adjusted chart
/// time, so the key is always up before the following press; the bound
/// deliberately ignores shift and jitter so it cannot be pushed past the
/// next note.
pub fn schedule_object(
    obj: &HitObject,
    next: Option<&HitObject>,
    start_adjustment_ms: i64,
    timing_shift_ms: i64,
    press_jitter_ms: i64,
    release_jitter_ms: i64,
) -> Schedule {
    let press_ms = obj.time_ms - start_adjustment_ms + press_jitter_ms + timing_shift_ms;

    let mut release_ms = if obj.is_hold() {
        // A hold without an end time degrades to an instant release.
        let end_ms = obj.end_time_ms.unwrap_or(obj.time_ms);
        end_ms - start_adjustment_ms + release_jitter_ms + timing_shift_ms
    } else {
        press_ms + TAP_DURATION_MS + release_jitter_ms
    };

    if let Some(next) = next {
        let latest_ms = next.time_ms - start_adjustment_ms - SAFETY_MARGIN_MS;
        if release_ms > latest_ms {
            release_ms = latest_ms;
        }
    }

    Schedule {
        press_ms,
        release_ms,
    }
}
