// Candidate - one fixed-width numeric access code

use super::error::{DomainError, Result};
use std::fmt;

/// Width of the codes in the shipped dictionary (0000-9999)
pub const DEFAULT_CANDIDATE_WIDTH: usize = 4;

/// Largest width whose value range still fits in a u32
pub const MAX_CANDIDATE_WIDTH: usize = 9;

/// A fixed-width numeric code.
///
/// The value is numeric but leading zeros are significant: `0042` and `42`
/// at width 4 are the same candidate and both display as `0042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    value: u32,
    width: usize,
}

impl Candidate {
    /// Create a candidate from its numeric value
    ///
    /// # Errors
    /// - `InvalidWidth` if width is 0 or larger than `MAX_CANDIDATE_WIDTH`
    /// - `ValueOutOfRange` if value needs more than `width` digits
    pub fn new(value: u32, width: usize) -> Result<Self> {
        if width == 0 || width > MAX_CANDIDATE_WIDTH {
            return Err(DomainError::InvalidWidth(width));
        }
        if value >= 10u32.pow(width as u32) {
            return Err(DomainError::ValueOutOfRange { value, width });
        }
        Ok(Self { value, width })
    }

    /// Parse a dictionary or ledger token
    ///
    /// Accepts 1..=width ASCII digits. Shorter tokens are read as if
    /// zero-padded on the left.
    ///
    /// # Example
    /// ```text
    /// let c = Candidate::parse("42", 4)?;
    /// assert_eq!(c.to_string(), "0042");
    /// ```
    pub fn parse(token: &str, width: usize) -> Result<Self> {
        if width == 0 || width > MAX_CANDIDATE_WIDTH {
            return Err(DomainError::InvalidWidth(width));
        }
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidCandidate {
                token: token.to_string(),
                reason: "expected ASCII decimal digits".to_string(),
            });
        }
        if token.len() > width {
            return Err(DomainError::InvalidCandidate {
                token: token.to_string(),
                reason: format!("longer than {} digits", width),
            });
        }

        // Length is bounded by MAX_CANDIDATE_WIDTH, so this cannot overflow
        let value = token
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        Self::new(value, width)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Digits in reading order (most significant first), zero-padded to width
    pub fn digits(&self) -> Vec<u8> {
        // mod/div decomposition yields least significant first
        let mut reversed = Vec::with_capacity(self.width);
        let mut rest = self.value;
        for _ in 0..self.width {
            reversed.push((rest % 10) as u8);
            rest /= 10;
        }
        reversed.reverse();
        reversed
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}
