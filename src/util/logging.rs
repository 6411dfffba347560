use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing for a host that embeds the scheduler.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between debug and
/// info filtering of this crate. With `log_dir` the output is additionally
/// written to a daily-rolled file in that directory. Call once per process;
/// a second call fails with the subscriber error.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "lanepilot=debug,warn"
    } else {
        "lanepilot=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "lanepilot.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The writer stops when its guard drops; leak it so logging lives for
        // the rest of the process.
        std::mem::forget(guard);

        registry
            .with(fmt::layer().with_target(true))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
