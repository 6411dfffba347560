pub mod config;
pub mod error;
pub mod jitter;
pub mod model;
pub mod player;
pub mod session;
pub mod traits;
pub mod util;
