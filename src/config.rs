use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::note::Key;

/// How the partitioner decides the number of lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneCountMode {
    /// Infer the lane count from the distinct horizontal positions in the chart.
    Auto,
    /// Use exactly this many evenly spaced lanes. Must be in 1..=9.
    Fixed(usize),
}

/// What a lane player does between clock polls while waiting for a target time.
///
/// Busy-wait polling is deliberate: sleep-based waits have too much
/// granularity for sub-millisecond key timing. The strategy only controls how
/// much CPU the wait burns, never whether it polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStrategy {
    /// Tight spin with a CPU spin hint. Most accurate, one core per lane.
    Spin,
    /// Yield to the OS scheduler between polls.
    Yield,
    /// Sleep this long between polls. Accuracy degrades to the sleep length.
    Sleep(Duration),
}

/// Configuration snapshot for one playback session.
///
/// `timing_shift_ms` and `jitter_amplitude_ms` seed the live tunables; the
/// rest is immutable for the session's duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// When false the scheduler runs dry: full timing, no key events.
    pub enable_keys: bool,
    /// Subtracted from every chart timestamp, aligning chart time to the
    /// session's start epoch.
    pub start_adjustment_ms: i64,
    /// Initial global timing shift, added to every press/release time.
    pub timing_shift_ms: i64,
    /// Initial jitter amplitude. Treated as 3 standard deviations, so
    /// roughly 99.7% of draws land within this many milliseconds.
    pub jitter_amplitude_ms: i64,
    pub lane_count: LaneCountMode,
    /// Explicit per-lane key table, left to right. Overrides the default
    /// layout; length must equal the lane count.
    pub key_bindings: Option<Vec<Key>>,
    pub poll: PollStrategy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            enable_keys: true,
            start_adjustment_ms: 0,
            timing_shift_ms: 0,
            jitter_amplitude_ms: 30,
            lane_count: LaneCountMode::Auto,
            key_bindings: None,
            poll: PollStrategy::Spin,
        }
    }
}
