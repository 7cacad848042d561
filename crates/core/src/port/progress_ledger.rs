// Progress Ledger Port
// Append-only durable record of attempted candidates; its last entry is the resume checkpoint

use crate::domain::{Candidate, LedgerEntry};
use crate::error::Result;
use async_trait::async_trait;

/// Progress ledger port
///
/// Implementations:
/// - FileProgressLedger (infra-fs): one zero-padded line per attempt
/// - mocks::InMemoryLedger: shared vector for tests
#[async_trait]
pub trait ProgressLedger: Send {
    /// Append one entry and make it durable before returning
    ///
    /// # Errors
    /// - AppError::Write if the record could not be written or synced
    async fn append(&mut self, entry: &LedgerEntry) -> Result<()>;

    /// Most recently appended candidate, `None` for a missing or empty ledger
    ///
    /// Scans the whole ledger; intended to run once at start-up.
    async fn last_entry(&self) -> Result<Option<Candidate>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    /// In-memory ledger; clones share the same entries
    #[derive(Clone, Default)]
    pub struct InMemoryLedger {
        entries: Arc<Mutex<Vec<LedgerEntry>>>,
        fail_writes: Arc<Mutex<bool>>,
    }

    impl InMemoryLedger {
        pub fn new() -> Self {
            Self::default()
        }

        /// Ledger pre-filled with candidates from an earlier run
        pub fn with_history(candidates: &[Candidate]) -> Self {
            let ledger = Self::new();
            ledger
                .entries
                .lock()
                .unwrap()
                .extend(candidates.iter().map(|c| LedgerEntry::new(*c, 0)));
            ledger
        }

        pub fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }

        pub fn entries(&self) -> Vec<LedgerEntry> {
            self.entries.lock().unwrap().clone()
        }

        pub fn candidates(&self) -> Vec<Candidate> {
            self.entries().into_iter().map(|e| e.candidate).collect()
        }
    }

    #[async_trait]
    impl ProgressLedger for InMemoryLedger {
        async fn append(&mut self, entry: &LedgerEntry) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(AppError::Write {
                    path: "mock-ledger".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "mock write failure"),
                });
            }
            self.entries.lock().unwrap().push(*entry);
            Ok(())
        }

        async fn last_entry(&self) -> Result<Option<Candidate>> {
            Ok(self.entries.lock().unwrap().last().map(|e| e.candidate))
        }
    }
}
