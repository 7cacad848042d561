// Time Provider Port (for testability)

/// Time provider interface (allows fixed clocks in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

pub mod mocks {
    use super::*;

    /// Clock frozen at one instant
    #[derive(Default)]
    pub struct FixedClock {
        now: i64,
    }

    impl FixedClock {
        pub fn at(millis: i64) -> Self {
            Self { now: millis }
        }
    }

    impl TimeProvider for FixedClock {
        fn now_millis(&self) -> i64 {
            self.now
        }
    }
}
