// pincrawl Core - Domain Logic, Ports & Attempt Scheduler
// NO infrastructure dependencies (filesystem and device access live in infra crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
