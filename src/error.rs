use thiserror::Error;

use crate::model::note::MAX_LANES;

/// Configuration problems detected at session start.
///
/// All of these are refused before any lane thread is spawned; once playback
/// is running the scheduler has no recoverable error paths.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lane count must be in 1..={MAX_LANES}, got {0}")]
    LaneCount(usize),

    #[error("key binding table has {got} entries, expected {expected}")]
    KeyTableLength { expected: usize, got: usize },
}
