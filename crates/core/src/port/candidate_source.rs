// Candidate Source Port
// Ordered, forward-only sequence of candidates read from a durable dictionary

use crate::domain::Candidate;
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Result of scanning the dictionary for the resume checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Checkpoint found; `skipped` entries (checkpoint included) were consumed
    Resumed { skipped: u64 },
    /// Dictionary ended before the checkpoint appeared
    NotFound { scanned: u64 },
}

/// Candidate source port
///
/// Implementations:
/// - FileCandidateSource (infra-fs): whitespace-delimited dictionary file
/// - mocks::VecCandidateSource: in-memory list for tests
#[async_trait]
pub trait CandidateSource: Send {
    /// Produce the next candidate, or `None` once the dictionary is exhausted
    ///
    /// The sequence is lazy and forward-only; it cannot be rewound without
    /// reopening the source.
    ///
    /// # Errors
    /// - AppError::Read if the underlying file cannot be read
    async fn next(&mut self) -> Result<Option<Candidate>>;

    /// Advance past `last`, the most recently attempted candidate
    ///
    /// The scan is bounded by the dictionary length: if the end is reached
    /// without a match the source is left exhausted and `NotFound` is
    /// returned.
    async fn resume_to(&mut self, last: Candidate) -> Result<ResumeOutcome> {
        let mut consumed = 0u64;
        while let Some(candidate) = self.next().await? {
            consumed += 1;
            if candidate == last {
                info!(checkpoint = %last, skipped = consumed, "Resumed past checkpoint");
                return Ok(ResumeOutcome::Resumed { skipped: consumed });
            }
            debug!(candidate = %candidate, "Skipping previously attempted candidate");
        }

        warn!(
            checkpoint = %last,
            scanned = consumed,
            "Checkpoint not found in dictionary"
        );
        Ok(ResumeOutcome::NotFound { scanned: consumed })
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::VecDeque;

    /// In-memory candidate source
    pub struct VecCandidateSource {
        remaining: VecDeque<Candidate>,
        reads: usize,
        fail_at_read: Option<usize>,
    }

    impl VecCandidateSource {
        pub fn new(candidates: Vec<Candidate>) -> Self {
            Self {
                remaining: candidates.into(),
                reads: 0,
                fail_at_read: None,
            }
        }

        /// Build from 4-digit tokens, e.g. `from_tokens(&["1000", "1001"])`
        pub fn from_tokens(tokens: &[&str]) -> Self {
            let candidates = tokens
                .iter()
                .map(|t| Candidate::parse(t, 4).unwrap())
                .collect();
            Self::new(candidates)
        }

        /// Make the n-th call to `next` (0-based) fail with a read error
        pub fn failing_at(mut self, read: usize) -> Self {
            self.fail_at_read = Some(read);
            self
        }

        pub fn reads(&self) -> usize {
            self.reads
        }
    }

    #[async_trait]
    impl CandidateSource for VecCandidateSource {
        async fn next(&mut self) -> Result<Option<Candidate>> {
            let read = self.reads;
            self.reads += 1;
            if self.fail_at_read == Some(read) {
                return Err(AppError::Read {
                    path: "mock-dictionary".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "mock read failure"),
                });
            }
            Ok(self.remaining.pop_front())
        }
    }
}
