//! Keystroke plan - the exact key event sequence that enters one candidate
//!
//! Every key is pressed, held, released and allowed to settle. The timing is a
//! debounce requirement of the target device class.

use super::candidate::Candidate;
use std::time::Duration;

/// Hold time after a key press (50ms)
pub const KEY_PRESS_HOLD: Duration = Duration::from_millis(50);

/// Settle time after a key release (50ms)
pub const KEY_RELEASE_SETTLE: Duration = Duration::from_millis(50);

/// A key on the emulated keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Enter,
}

impl Key {
    /// HID keyboard usage id (USB HID Usage Tables, page 0x07)
    pub fn hid_usage(&self) -> u8 {
        match self {
            // 1..9 are contiguous from 0x1E, 0 comes after 9
            Key::Digit(0) => 0x27,
            Key::Digit(d) => 0x1D + d,
            Key::Enter => 0x28,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press(Key),
    /// Release every held key
    Release,
}

/// Press/release timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTiming {
    pub press_hold: Duration,
    pub release_settle: Duration,
}

impl Default for KeyTiming {
    fn default() -> Self {
        Self {
            press_hold: KEY_PRESS_HOLD,
            release_settle: KEY_RELEASE_SETTLE,
        }
    }
}

/// One event followed by the time to wait before the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStep {
    pub event: KeyEvent,
    pub settle: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokePlan {
    steps: Vec<KeyStep>,
}

impl KeystrokePlan {
    /// Digits left to right, then Enter
    pub fn for_candidate(candidate: &Candidate, timing: &KeyTiming) -> Self {
        let keys = candidate
            .digits()
            .into_iter()
            .map(Key::Digit)
            .chain(std::iter::once(Key::Enter));

        let mut steps = Vec::with_capacity((candidate.width() + 1) * 2);
        for key in keys {
            steps.push(KeyStep {
                event: KeyEvent::Press(key),
                settle: timing.press_hold,
            });
            steps.push(KeyStep {
                event: KeyEvent::Release,
                settle: timing.release_settle,
            });
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[KeyStep] {
        &self.steps
    }

    /// Total time the plan takes to replay
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.settle).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hid_usage_ids() {
        assert_eq!(Key::Digit(1).hid_usage(), 0x1E);
        assert_eq!(Key::Digit(9).hid_usage(), 0x26);
        assert_eq!(Key::Digit(0).hid_usage(), 0x27);
        assert_eq!(Key::Enter.hid_usage(), 0x28);
    }

    #[test]
    fn test_plan_replays_digits_in_reading_order() {
        let candidate = Candidate::parse("0123", 4).unwrap();
        let plan = KeystrokePlan::for_candidate(&candidate, &KeyTiming::default());

        let presses: Vec<Key> = plan
            .steps()
            .iter()
            .filter_map(|s| match s.event {
                KeyEvent::Press(k) => Some(k),
                KeyEvent::Release => None,
            })
            .collect();

        assert_eq!(
            presses,
            vec![
                Key::Digit(0),
                Key::Digit(1),
                Key::Digit(2),
                Key::Digit(3),
                Key::Enter
            ]
        );
    }

    #[test]
    fn test_plan_alternates_press_and_release() {
        let candidate = Candidate::parse("9876", 4).unwrap();
        let plan = KeystrokePlan::for_candidate(&candidate, &KeyTiming::default());

        assert_eq!(plan.steps().len(), 10);
        for pair in plan.steps().chunks(2) {
            assert!(matches!(pair[0].event, KeyEvent::Press(_)));
            assert_eq!(pair[1].event, KeyEvent::Release);
            assert_eq!(pair[0].settle, KEY_PRESS_HOLD);
            assert_eq!(pair[1].settle, KEY_RELEASE_SETTLE);
        }
        // 5 keys x (50ms + 50ms)
        assert_eq!(plan.duration(), Duration::from_millis(500));
    }
}
