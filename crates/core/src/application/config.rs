// Scheduler configuration
// Compile-time defaults gathered in one place so they can be tuned per target device

use crate::application::scheduler::constants::*;
use crate::domain::candidate::{DEFAULT_CANDIDATE_WIDTH, MAX_CANDIDATE_WIDTH};
use crate::domain::KeyTiming;
use crate::error::{AppError, Result};
use std::time::Duration;

/// Lockout pacing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    pub starting_timeout: Duration,
    pub safety_margin: Duration,
    pub doubling_threshold: u32,
    pub grace_floor: u32,
    pub grace_wait: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            starting_timeout: STARTING_TIMEOUT,
            safety_margin: TIMEOUT_SAFETY_MARGIN,
            doubling_threshold: DOUBLING_THRESHOLD,
            grace_floor: GRACE_FLOOR,
            grace_wait: GRACE_WAIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub backoff: BackoffConfig,
    pub key_timing: KeyTiming,
    pub poll_interval: Duration,
    pub candidate_width: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            key_timing: KeyTiming::default(),
            poll_interval: PRESENCE_POLL_INTERVAL,
            candidate_width: DEFAULT_CANDIDATE_WIDTH,
        }
    }
}

impl SchedulerConfig {
    /// Reject settings the scheduler loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.backoff.doubling_threshold == 0 {
            return Err(AppError::Config(
                "doubling threshold must be at least 1".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            // A zero poll would spin while the consumer is absent
            return Err(AppError::Config("poll interval must be non-zero".to_string()));
        }
        if self.candidate_width == 0 || self.candidate_width > MAX_CANDIDATE_WIDTH {
            return Err(AppError::Config(format!(
                "candidate width must be 1..={}, got {}",
                MAX_CANDIDATE_WIDTH, self.candidate_width
            )));
        }
        Ok(())
    }
}
