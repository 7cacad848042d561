// Domain Layer - Pure values and entities

pub mod candidate;
pub mod error;
pub mod keystroke;
pub mod ledger;

// Re-exports
pub use candidate::Candidate;
pub use error::DomainError;
pub use keystroke::{Key, KeyEvent, KeyStep, KeyTiming, KeystrokePlan};
pub use ledger::LedgerEntry;
