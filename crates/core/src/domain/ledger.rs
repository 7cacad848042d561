// Progress Ledger entry

use super::candidate::Candidate;

/// One attempted candidate and when it was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Wall-clock time of the attempt, milliseconds since epoch
    pub attempted_at: i64,
    pub candidate: Candidate,
}

impl LedgerEntry {
    pub fn new(candidate: Candidate, attempted_at: i64) -> Self {
        Self {
            attempted_at,
            candidate,
        }
    }

    /// On-disk record: zero-padded digits terminated by a newline
    pub fn to_record(&self) -> String {
        format!("{}\n", self.candidate)
    }

    /// Wall-clock time formatted for logs (`HH:MM:SS`, UTC)
    pub fn time_of_day(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.attempted_at)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}
