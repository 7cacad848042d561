// Presence Gate Port
// Whether the emulated keyboard currently has an attached, enumerated consumer
use async_trait::async_trait;

/// Presence gate port
///
/// Polled by the scheduler. Absence is a normal, possibly long-lived state
/// (target unplugged or rebooting), never an error.
#[async_trait]
pub trait PresenceGate: Send + Sync {
    async fn is_present(&self) -> bool;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Presence gate that replays a script, then repeats a fallback answer
    #[derive(Clone)]
    pub struct ScriptedPresenceGate {
        script: Arc<Mutex<VecDeque<bool>>>,
        fallback: bool,
        polls: Arc<Mutex<usize>>,
    }

    impl ScriptedPresenceGate {
        pub fn new(script: Vec<bool>, fallback: bool) -> Self {
            Self {
                script: Arc::new(Mutex::new(script.into())),
                fallback,
                polls: Arc::new(Mutex::new(0)),
            }
        }

        pub fn always_present() -> Self {
            Self::new(Vec::new(), true)
        }

        /// Absent for `polls` polls, present afterwards
        pub fn present_after(polls: usize) -> Self {
            Self::new(vec![false; polls], true)
        }

        pub fn poll_count(&self) -> usize {
            *self.polls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PresenceGate for ScriptedPresenceGate {
        async fn is_present(&self) -> bool {
            *self.polls.lock().unwrap() += 1;
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.fallback)
        }
    }
}
