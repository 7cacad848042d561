// Scheduler constants (no magic values in the loop)
use std::time::Duration;

/// Attempts between base timeout doublings (global counter window)
pub const DOUBLING_THRESHOLD: u32 = 200;

/// Attempts allowed after a long wait before the next long wait is enforced
pub const GRACE_FLOOR: u32 = 1;

/// Short wait after a grace attempt (1s)
pub const GRACE_WAIT: Duration = Duration::from_secs(1);

/// Lockout the target imposes once grace attempts are used up (960s)
pub const STARTING_TIMEOUT: Duration = Duration::from_secs(960);

/// Margin added to the starting timeout to stay behind the target lockout clock (5s)
pub const TIMEOUT_SAFETY_MARGIN: Duration = Duration::from_secs(5);

/// Presence poll interval; also the waiting blink half-period (100ms)
pub const PRESENCE_POLL_INTERVAL: Duration = Duration::from_millis(100);
