use std::sync::atomic::{AtomicI64, Ordering};

/// Abstraction over time sources.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
///
/// Shared by every lane thread in a session, so implementations must be
/// thread-safe. Each lane captures its own epoch once at start and only ever
/// compares differences, so the absolute origin is arbitrary.
pub trait TimeProvider: Send + Sync {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: std::time::Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Mock time provider for deterministic testing.
///
/// Advanced explicitly by the test while lane threads poll it.
pub struct MockTimeProvider {
    current_us: AtomicI64,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_us: AtomicI64::new(0),
        }
    }

    pub fn set_time(&self, us: i64) {
        self.current_us.store(us, Ordering::Release);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.fetch_add(delta_us, Ordering::AcqRel);
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.load(Ordering::Acquire)
    }
}
