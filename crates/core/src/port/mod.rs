// Port Layer - Interfaces for external collaborators

pub mod candidate_source;
pub mod keystroke_device;
pub mod presence_gate;
pub mod progress_ledger;
pub mod sleeper; // For deterministic testing
pub mod status_signal;
pub mod time_provider;

// Re-exports
pub use candidate_source::{CandidateSource, ResumeOutcome};
pub use keystroke_device::KeystrokeDevice;
pub use presence_gate::PresenceGate;
pub use progress_ledger::ProgressLedger;
pub use sleeper::{Sleeper, TokioSleeper};
pub use status_signal::StatusSignal;
pub use time_provider::{SystemTimeProvider, TimeProvider};
