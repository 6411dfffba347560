// Seams to the outside world: the clock and the key-injection primitive.

pub mod key_sink;
pub mod time;

pub use key_sink::{KeyEvent, KeySink, NullKeySink, RecordingKeySink};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
