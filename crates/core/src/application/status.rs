//! Status indicator - drives the single-bit status output from scheduler phase
//!
//! Patterns:
//! - bring-up: solid on
//! - waiting for presence: toggled on every poll (100ms on / 100ms off)
//! - attempting: off
//! - exhausted: three 100ms blinks, 2s pause, repeated forever

use crate::port::{Sleeper, StatusSignal};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Blinks per done-pattern cycle
pub const DONE_BLINKS: usize = 3;

/// On and off time of each done blink (100ms)
pub const DONE_BLINK_PERIOD: Duration = Duration::from_millis(100);

/// Dark pause closing each done-pattern cycle (2s)
pub const DONE_PAUSE: Duration = Duration::from_secs(2);

/// Scheduler phase as reflected on the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BringUp,
    WaitingForPresence,
    Attempting,
    Exhausted,
}

pub struct StatusIndicator {
    signal: Arc<dyn StatusSignal>,
    sleeper: Arc<dyn Sleeper>,
    phase: Phase,
    level: bool,
}

impl StatusIndicator {
    /// Starts in bring-up with the output on
    pub fn new(signal: Arc<dyn StatusSignal>, sleeper: Arc<dyn Sleeper>) -> Self {
        let indicator = Self {
            signal,
            sleeper,
            phase: Phase::BringUp,
            level: true,
        };
        indicator.signal.set_level(true);
        indicator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "Status phase change");
            self.phase = phase;
        }
    }

    fn set(&mut self, on: bool) {
        self.level = on;
        self.signal.set_level(on);
    }

    /// One waiting poll: flip the output
    pub fn toggle_waiting(&mut self) {
        self.enter(Phase::WaitingForPresence);
        let next = !self.level;
        self.set(next);
    }

    pub fn attempting(&mut self) {
        self.enter(Phase::Attempting);
        if self.level {
            self.set(false);
        }
    }

    /// One full done-pattern cycle
    pub async fn done_cycle(&mut self) {
        self.enter(Phase::Exhausted);
        for _ in 0..DONE_BLINKS {
            self.set(true);
            self.sleeper.sleep(DONE_BLINK_PERIOD).await;
            self.set(false);
            self.sleeper.sleep(DONE_BLINK_PERIOD).await;
        }
        self.sleeper.sleep(DONE_PAUSE).await;
    }

    /// Repeat the done pattern; never returns
    pub async fn signal_done_forever(&mut self) -> Infallible {
        loop {
            self.done_cycle().await;
        }
    }
}
