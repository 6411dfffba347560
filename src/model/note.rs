use serde::{Deserialize, Serialize};

/// Maximum number of lanes supported by the key layout.
pub const MAX_LANES: usize = 9;

/// Horizontal extent of the playfield, in chart units.
pub const PLAYFIELD_WIDTH: f64 = 512.0;

/// A keyboard key identified by its virtual-key code.
///
/// The code is opaque to the scheduling core: it is handed unchanged to the
/// [`KeySink`](crate::traits::key_sink::KeySink) on press and release. Code 0
/// is reserved to mean "no key bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const A: Key = Key(0x41);
    pub const S: Key = Key(0x53);
    pub const D: Key = Key(0x44);
    pub const F: Key = Key(0x46);
    pub const SPACE: Key = Key(0x20);
    pub const J: Key = Key(0x4A);
    pub const K: Key = Key(0x4B);
    pub const L: Key = Key(0x4C);
    pub const SEMICOLON: Key = Key(0xBA);
}

/// Type of note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Tap,
    Hold,
}

/// A single note in the chart.
///
/// Supplied fully parsed by the host; the core never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitObject {
    /// Horizontal position in playfield units (0..512), identifying the lane.
    pub x: i64,
    /// Start timestamp in milliseconds from chart start.
    pub time_ms: i64,
    /// End timestamp for hold notes.
    pub end_time_ms: Option<i64>,
    pub kind: NoteKind,
}

impl HitObject {
    /// Create a new tap note.
    pub fn tap(x: i64, time_ms: i64) -> Self {
        Self {
            x,
            time_ms,
            end_time_ms: None,
            kind: NoteKind::Tap,
        }
    }

    /// Create a new hold note spanning `start_ms..end_ms`.
    pub fn hold(x: i64, start_ms: i64, end_ms: i64) -> Self {
        Self {
            x,
            time_ms: start_ms,
            end_time_ms: Some(end_ms),
            kind: NoteKind::Hold,
        }
    }

    /// Returns true if this is a hold note.
    pub fn is_hold(&self) -> bool {
        matches!(self.kind, NoteKind::Hold)
    }
}
