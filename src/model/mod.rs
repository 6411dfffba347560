// Chart data model and lane partitioning.

pub mod note;
pub mod partition;

pub use note::{HitObject, Key, MAX_LANES, NoteKind, PLAYFIELD_WIDTH};
pub use partition::{Lane, Partition, default_key_layout, partition, snap_to_lane_centers};
