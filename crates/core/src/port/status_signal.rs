// Status Signal Port
// Single on/off output (an LED on real hardware)

/// Status signal port
///
/// Setting the level is best-effort; implementations log their own failures.
pub trait StatusSignal: Send + Sync {
    fn set_level(&self, on: bool);
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every level written
    #[derive(Clone, Default)]
    pub struct RecordingStatusSignal {
        levels: Arc<Mutex<Vec<bool>>>,
    }

    impl RecordingStatusSignal {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn levels(&self) -> Vec<bool> {
            self.levels.lock().unwrap().clone()
        }

        pub fn current(&self) -> Option<bool> {
            self.levels.lock().unwrap().last().copied()
        }
    }

    impl StatusSignal for RecordingStatusSignal {
        fn set_level(&self, on: bool) {
            self.levels.lock().unwrap().push(on);
        }
    }
}
