// HID gadget keyboard
// Writes raw 8-byte boot-protocol keyboard reports to the gadget character device
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use pincrawl_core::domain::KeyEvent;
use pincrawl_core::error::{AppError, Result};
use pincrawl_core::port::KeystrokeDevice;

/// Boot keyboard input report length
pub const REPORT_LEN: usize = 8;

/// Keystroke device writing boot-protocol reports to a gadget node (e.g. `/dev/hidg0`)
///
/// The node is opened lazily and reopened after any failed write, since the
/// host dropping the bus invalidates the open handle.
pub struct HidGadgetKeyboard {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl HidGadgetKeyboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: Mutex::new(None),
        }
    }

    async fn write_report(&self, report: &[u8; REPORT_LEN]) -> std::io::Result<()> {
        let mut handle = self.handle.lock().await;
        if handle.is_none() {
            let file = OpenOptions::new().write(true).open(&self.path).await?;
            debug!(path = %self.path.display(), "Opened HID gadget node");
            *handle = Some(file);
        }

        let result = match handle.as_mut() {
            Some(file) => match file.write_all(report).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e),
            },
            None => Ok(()),
        };

        if result.is_err() {
            *handle = None;
        }
        result
    }
}

/// Encode one event as a boot keyboard report
///
/// Layout: modifiers, reserved, then up to six usage ids. A press carries a
/// single usage; a release is the all-zero report.
pub fn encode_report(event: KeyEvent) -> [u8; REPORT_LEN] {
    let mut report = [0u8; REPORT_LEN];
    if let KeyEvent::Press(key) = event {
        report[2] = key.hid_usage();
    }
    report
}

#[async_trait]
impl KeystrokeDevice for HidGadgetKeyboard {
    async fn send(&self, event: KeyEvent) -> Result<()> {
        let report = encode_report(event);
        self.write_report(&report).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "HID report rejected");
            AppError::Device(format!("{}: {}", self.path.display(), e))
        })
    }
}
