// USB device controller presence gate
// The UDC state attribute reads "configured" once the host has enumerated the gadget
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pincrawl_core::port::PresenceGate;

/// Default sysfs class directory for USB device controllers
pub const UDC_CLASS_DIR: &str = "/sys/class/udc";

const CONFIGURED: &str = "configured";

pub struct UdcPresenceGate {
    state_path: PathBuf,
}

impl UdcPresenceGate {
    pub fn new(state_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
        }
    }

    /// State attribute of the first controller under `class_dir`, if any
    ///
    /// Controllers are taken in name order so the choice is stable across boots.
    pub fn discover(class_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let entries = std::fs::read_dir(class_dir.as_ref()).ok()?;
        let mut controllers: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path().join("state"))
            .filter(|state| state.is_file())
            .collect();
        controllers.sort();

        let found = controllers.into_iter().next();
        if let Some(path) = &found {
            info!(path = %path.display(), "Discovered USB device controller");
        }
        found
    }
}

#[async_trait]
impl PresenceGate for UdcPresenceGate {
    async fn is_present(&self) -> bool {
        match tokio::fs::read_to_string(&self.state_path).await {
            Ok(state) => state.trim() == CONFIGURED,
            Err(e) => {
                // Controller not bound yet reads the same as no host
                debug!(path = %self.state_path.display(), error = %e, "UDC state unreadable");
                false
            }
        }
    }
}
