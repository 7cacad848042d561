//! Backoff policy - how long to wait after each attempt
//!
//! Models a target whose lockout grows with failures: a grace floor of
//! attempts at the start of a run that only pay a short wait, a long wait
//! after every attempt once the floor is used up, and a base timeout that
//! doubles every `doubling_threshold` attempts.
//!
//! The policy is a pure transition over [`BackoffState`]; the scheduler owns
//! the state value and threads it through every call.

use crate::application::config::BackoffConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Counters and current base timeout, process lifetime only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffState {
    /// Attempts since the last base timeout doubling
    pub global_attempts: u32,
    /// Attempts since the last enforced long wait
    pub consecutive_attempts: u32,
    /// Long wait duration; never decreases within a run
    pub base_timeout: Duration,
    /// Set by the first lockout; no grace attempts follow it in this run
    pub grace_spent: bool,
}

/// Wait decided for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Short wait, the attempt was within the grace floor
    Grace(Duration),
    /// Full lockout wait of the base timeout
    Lockout(Duration),
}

impl Wait {
    pub fn duration(&self) -> Duration {
        match self {
            Wait::Grace(d) | Wait::Lockout(d) => *d,
        }
    }

    pub fn is_lockout(&self) -> bool {
        matches!(self, Wait::Lockout(_))
    }
}

#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    config: BackoffConfig,
}

impl BackoffPolicy {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config }
    }

    /// State at process start: zero counters, base = starting timeout + margin
    pub fn initial_state(&self) -> BackoffState {
        BackoffState {
            global_attempts: 0,
            consecutive_attempts: 0,
            base_timeout: self.config.starting_timeout + self.config.safety_margin,
            grace_spent: false,
        }
    }

    /// Account for one attempt and decide the wait that follows it
    ///
    /// Order matters:
    /// 1. grace vs lockout is decided from the consecutive counter as it stood
    ///    before this attempt, with the base timeout currently in force; once a
    ///    lockout has been served every later attempt is a lockout too
    /// 2. the global counter is bumped and, on reaching the threshold, resets
    ///    and doubles the base for the attempts that follow
    pub fn after_attempt(&self, state: BackoffState) -> (BackoffState, Wait) {
        let mut next = state;

        let wait = if !state.grace_spent && state.consecutive_attempts < self.config.grace_floor {
            next.consecutive_attempts += 1;
            Wait::Grace(self.config.grace_wait)
        } else {
            next.consecutive_attempts = 0;
            next.grace_spent = true;
            Wait::Lockout(state.base_timeout)
        };

        next.global_attempts += 1;
        if next.global_attempts >= self.config.doubling_threshold {
            next.global_attempts = 0;
            next.base_timeout = state.base_timeout.saturating_mul(2);
            info!(
                base_timeout_secs = next.base_timeout.as_secs(),
                "Doubling base timeout"
            );
        }

        debug!(
            wait = ?wait,
            global = next.global_attempts,
            consecutive = next.consecutive_attempts,
            "Backoff decided"
        );

        (next, wait)
    }
}
