// Time Provider Port (for testability)
// reason: async-trait for sleep

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Monotonic clock + sleep (allows virtual time in tests)
#[async_trait]
pub trait TimeProvider: Send + Sync {
    /// Time elapsed on a monotonic clock since an arbitrary origin
    fn now(&self) -> Duration;

    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// System time provider (production): `Instant` based, tokio sleep
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Virtual clock: `sleep` returns immediately and advances time
    #[derive(Clone, Default)]
    pub struct MockTimeProvider {
        now: Arc<Mutex<Duration>>,
        sleeps: Arc<Mutex<Vec<Duration>>>,
    }

    impl MockTimeProvider {
        pub fn new() -> Self {
            Self::default()
        }
        /// Move the clock forward without recording a sleep
        pub fn advance(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = now.saturating_add(duration);
        }
        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TimeProvider for MockTimeProvider {
        fn now(&self) -> Duration {
            *self.now.lock().unwrap()
        }
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
            self.advance(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_time_is_monotonic() {
        let clock = SystemTimeProvider::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(20)).await;
        let after = clock.now();

        assert!(after >= before + Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_mock_sleep_advances_virtual_time() {
        let clock = mocks::MockTimeProvider::new();
        clock.sleep(Duration::from_secs(2)).await;
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.now(), Duration::from_millis(2500));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);
    }
}
