// pincrawl Infrastructure - Device Adapters
// Implements: KeystrokeDevice, PresenceGate, StatusSignal (Linux USB gadget + sysfs)

pub mod hid_keyboard;
pub mod led;
pub mod udc;

pub use hid_keyboard::HidGadgetKeyboard;
pub use led::{SysfsLed, TracingStatusSignal};
pub use udc::UdcPresenceGate;
