// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid candidate {token:?}: {reason}")]
    InvalidCandidate { token: String, reason: String },

    #[error("Invalid candidate width: {0}")]
    InvalidWidth(usize),

    #[error("Candidate value {value} does not fit in {width} digits")]
    ValueOutOfRange { value: u32, width: usize },
}

pub type Result<T> = std::result::Result<T, DomainError>;
