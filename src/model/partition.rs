//! Column partitioning: buckets hit objects into lanes and binds keys.

use crate::config::{LaneCountMode, SessionOptions};
use crate::error::ConfigError;
use crate::model::note::{HitObject, Key, MAX_LANES, PLAYFIELD_WIDTH};

/// One playfield column with its key binding and note sequence.
#[derive(Debug, Clone)]
pub struct Lane {
    /// Lane index, 0 = leftmost.
    pub index: usize,
    /// Horizontal lane-center position the notes were matched against.
    pub position: i64,
    pub key: Key,
    /// Notes for this lane, non-decreasing by `time_ms`. Order matters:
    /// release capping looks at the next note in the same lane.
    pub objects: Vec<HitObject>,
}

/// Result of partitioning a chart into lanes.
#[derive(Debug, Clone)]
pub struct Partition {
    pub lanes: Vec<Lane>,
    /// Objects bucketed into a lane.
    pub assigned: usize,
    /// Objects whose position matched no lane. Tolerated, but reported.
    pub dropped: usize,
}

/// Partition a chart into lanes according to the session options.
///
/// Lane positions come either from `Fixed(l)` (evenly spaced centers across
/// the playfield) or from the distinct horizontal positions found in the
/// chart, capped at [`MAX_LANES`]. Positions are sorted ascending so lane 0
/// is always the leftmost column regardless of discovery order.
pub fn partition(objects: &[HitObject], options: &SessionOptions) -> Result<Partition, ConfigError> {
    let mut positions = match options.lane_count {
        LaneCountMode::Fixed(count) => {
            if !(1..=MAX_LANES).contains(&count) {
                return Err(ConfigError::LaneCount(count));
            }
            lane_centers(count)
        }
        LaneCountMode::Auto => detect_positions(objects),
    };
    positions.sort_unstable();

    let keys = match &options.key_bindings {
        Some(table) => {
            if table.len() != positions.len() {
                return Err(ConfigError::KeyTableLength {
                    expected: positions.len(),
                    got: table.len(),
                });
            }
            table.clone()
        }
        None => default_key_layout(positions.len()),
    };

    let mut lanes: Vec<Lane> = positions
        .iter()
        .zip(keys)
        .enumerate()
        .map(|(index, (&position, key))| Lane {
            index,
            position,
            key,
            objects: Vec::new(),
        })
        .collect();

    let mut assigned = 0;
    let mut dropped = 0;
    for obj in objects {
        match lanes.iter_mut().find(|lane| lane.position == obj.x) {
            Some(lane) => {
                lane.objects.push(*obj);
                assigned += 1;
            }
            None => dropped += 1,
        }
    }

    for lane in &mut lanes {
        lane.objects.sort_by_key(|obj| obj.time_ms);
    }

    Ok(Partition {
        lanes,
        assigned,
        dropped,
    })
}

/// Evenly spaced lane-center positions for an explicit lane count.
///
/// Truncating cast matches the positions charts use: 4 lanes map to
/// 64, 192, 320, 448.
pub fn lane_centers(lane_count: usize) -> Vec<i64> {
    (0..lane_count)
        .map(|i| ((i as f64 + 0.5) * PLAYFIELD_WIDTH / lane_count as f64) as i64)
        .collect()
}

/// Distinct horizontal positions in input order, capped at [`MAX_LANES`].
fn detect_positions(objects: &[HitObject]) -> Vec<i64> {
    let mut positions: Vec<i64> = Vec::new();
    for obj in objects {
        if !positions.contains(&obj.x) && positions.len() < MAX_LANES {
            positions.push(obj.x);
        }
    }
    positions
}

/// Default key layout for `lane_count` lanes, left to right.
///
/// The conventional home-row layout: Space on the exact middle lane when the
/// count is odd, the left lanes bound outward from F toward A, the right
/// lanes outward from J toward the semicolon. Callers guarantee
/// `lane_count <= MAX_LANES`.
pub fn default_key_layout(lane_count: usize) -> Vec<Key> {
    const LEFT: [Key; 4] = [Key::A, Key::S, Key::D, Key::F];
    const RIGHT: [Key; 4] = [Key::J, Key::K, Key::L, Key::SEMICOLON];

    let middle = lane_count / 2;
    let mut keys = vec![Key(0); lane_count];

    for offset in 0..middle {
        keys[middle - 1 - offset] = LEFT[LEFT.len() - 1 - offset];
    }
    let right_start = if lane_count % 2 == 1 {
        keys[middle] = Key::SPACE;
        middle + 1
    } else {
        middle
    };
    for (slot, &key) in keys[right_start..].iter_mut().zip(RIGHT.iter()) {
        *slot = key;
    }

    keys
}

/// Re-snap arbitrary horizontal positions onto the centers of a
/// `lane_count`-lane playfield.
///
/// Data-prep helper for charts whose positions do not already sit on lane
/// centers; each object lands in the column whose span contains its x.
pub fn snap_to_lane_centers(
    objects: &[HitObject],
    lane_count: usize,
) -> Result<Vec<HitObject>, ConfigError> {
    if !(1..=MAX_LANES).contains(&lane_count) {
        return Err(ConfigError::LaneCount(lane_count));
    }
    let column_width = PLAYFIELD_WIDTH / lane_count as f64;
    Ok(objects
        .iter()
        .map(|obj| {
            let column = ((obj.x as f64 / column_width) as usize).min(lane_count - 1);
            HitObject {
                x: ((column as f64 + 0.5) * column_width) as i64,
                ..*obj
            }
        })
        .collect())
}
