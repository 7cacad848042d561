// Keystroke emission - replays a candidate's keystroke plan on the keyboard port
use crate::domain::{Candidate, KeyTiming, KeystrokePlan};
use crate::port::{KeystrokeDevice, Sleeper};
use tracing::warn;

/// Type one candidate followed by Enter
///
/// Fire-and-forget: a failed event is logged and the plan continues with the
/// same timing. Returns the number of events the device rejected.
pub async fn emit_candidate(
    keyboard: &dyn KeystrokeDevice,
    sleeper: &dyn Sleeper,
    candidate: &Candidate,
    timing: &KeyTiming,
) -> usize {
    let plan = KeystrokePlan::for_candidate(candidate, timing);
    let mut failed = 0;

    for step in plan.steps() {
        if let Err(e) = keyboard.send(step.event).await {
            failed += 1;
            warn!(
                candidate = %candidate,
                event = ?step.event,
                error = %e,
                "Key event not delivered"
            );
        }
        sleeper.sleep(step.settle).await;
    }

    failed
}
