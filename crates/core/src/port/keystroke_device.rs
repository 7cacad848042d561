// Keystroke Device Port
// Emulated keyboard that transmits key events to the attached consumer

use crate::domain::KeyEvent;
use crate::error::Result;
use async_trait::async_trait;

/// Keystroke device port
///
/// Emission is fire-and-forget: callers do not retry and no acknowledgment
/// exists at this layer.
///
/// Implementations:
/// - HidGadgetKeyboard (infra-system): HID boot-keyboard reports on a gadget node
/// - mocks::RecordingKeyboard: records events for tests
#[async_trait]
pub trait KeystrokeDevice: Send + Sync {
    /// Transmit one key event
    ///
    /// # Errors
    /// - AppError::Device if the event could not be handed to the bus
    async fn send(&self, event: KeyEvent) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::Key;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    /// Records every event; clones share the recording
    #[derive(Clone, Default)]
    pub struct RecordingKeyboard {
        events: Arc<Mutex<Vec<KeyEvent>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl RecordingKeyboard {
        pub fn new() -> Self {
            Self::default()
        }

        /// Still records, but reports every send as failed
        pub fn failing() -> Self {
            let keyboard = Self::default();
            *keyboard.fail.lock().unwrap() = true;
            keyboard
        }

        pub fn events(&self) -> Vec<KeyEvent> {
            self.events.lock().unwrap().clone()
        }

        /// Codes submitted so far, one string per Enter press
        pub fn submitted_codes(&self) -> Vec<String> {
            let mut codes = Vec::new();
            let mut current = String::new();
            for event in self.events() {
                match event {
                    KeyEvent::Press(Key::Digit(d)) => current.push(char::from(b'0' + d)),
                    KeyEvent::Press(Key::Enter) => codes.push(std::mem::take(&mut current)),
                    KeyEvent::Release => {}
                }
            }
            codes
        }
    }

    #[async_trait]
    impl KeystrokeDevice for RecordingKeyboard {
        async fn send(&self, event: KeyEvent) -> Result<()> {
            self.events.lock().unwrap().push(event);
            if *self.fail.lock().unwrap() {
                return Err(AppError::Device("mock keyboard unplugged".to_string()));
            }
            Ok(())
        }
    }
}
