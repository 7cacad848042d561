// Status signal adapters
use std::path::PathBuf;
use tracing::{debug, warn};

use pincrawl_core::port::StatusSignal;

/// LED driven through a sysfs `brightness` attribute
pub struct SysfsLed {
    brightness_path: PathBuf,
}

impl SysfsLed {
    pub fn new(brightness_path: impl Into<PathBuf>) -> Self {
        Self {
            brightness_path: brightness_path.into(),
        }
    }
}

impl StatusSignal for SysfsLed {
    fn set_level(&self, on: bool) {
        let value = if on { "1" } else { "0" };
        if let Err(e) = std::fs::write(&self.brightness_path, value) {
            warn!(path = %self.brightness_path.display(), error = %e, "Failed to set LED");
        }
    }
}

/// Status signal for boards without a usable LED: levels go to the log
#[derive(Debug, Default)]
pub struct TracingStatusSignal;

impl StatusSignal for TracingStatusSignal {
    fn set_level(&self, on: bool) {
        debug!(on = on, "Status level");
    }
}
