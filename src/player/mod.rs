// Per-lane scheduling: target-time computation and the busy-wait player.

pub mod lane_player;
pub mod schedule;

pub use lane_player::{LaneOutcome, LanePlayer};
pub use schedule::{SAFETY_MARGIN_MS, Schedule, TAP_DURATION_MS, schedule_object};
