// Application Layer - Scheduling, pacing and signalling

pub mod backoff;
pub mod config;
pub mod emission;
pub mod scheduler;
pub mod status;

// Re-exports
pub use backoff::{BackoffPolicy, BackoffState, Wait};
pub use config::{BackoffConfig, SchedulerConfig};
pub use scheduler::{AttemptScheduler, RunSummary, SchedulerPorts, SchedulerState};
pub use status::{Phase, StatusIndicator};
