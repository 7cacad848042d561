// Sleeper Port (for testability)
// Every wait in the scheduler goes through here; sleeps always run to completion
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer sleeper (production)
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
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

    /// Returns immediately and records the requested durations
    #[derive(Clone, Default)]
    pub struct RecordingSleeper {
        sleeps: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }

        pub fn total(&self) -> Duration {
            self.sleeps().iter().sum()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
            tokio::task::yield_now().await;
        }
    }
}
