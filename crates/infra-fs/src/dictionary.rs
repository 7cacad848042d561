// Dictionary file CandidateSource
//
// Format: ASCII decimal tokens separated by whitespace or newlines, in attempt
// order. Tokens that are not valid candidates are skipped, so a given file
// always yields the same sequence.

use async_trait::async_trait;
use pincrawl_core::domain::Candidate;
use pincrawl_core::error::{AppError, Result};
use pincrawl_core::port::CandidateSource;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::{info, warn};

pub struct FileCandidateSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    // Remaining tokens of the current line
    pending: VecDeque<String>,
    line_no: u64,
    width: usize,
}

impl FileCandidateSource {
    /// Open a dictionary for a forward scan from the first entry
    ///
    /// # Errors
    /// - AppError::Open if the file cannot be opened
    /// - AppError::Domain if `width` is not a valid candidate width
    pub async fn open(path: impl AsRef<Path>, width: usize) -> Result<Self> {
        // Surface a bad width here rather than as a warning per token
        Candidate::new(0, width)?;

        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|source| AppError::Open {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), width = width, "Opened dictionary");

        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            pending: VecDeque::new(),
            line_no: 0,
            width,
        })
    }
}

#[async_trait]
impl CandidateSource for FileCandidateSource {
    async fn next(&mut self) -> Result<Option<Candidate>> {
        loop {
            while let Some(token) = self.pending.pop_front() {
                match Candidate::parse(&token, self.width) {
                    Ok(candidate) => return Ok(Some(candidate)),
                    Err(e) => warn!(
                        path = %self.path.display(),
                        line = self.line_no,
                        error = %e,
                        "Skipping invalid dictionary token"
                    ),
                }
            }

            let line = self
                .lines
                .next_line()
                .await
                .map_err(|source| AppError::Read {
                    path: self.path.clone(),
                    source,
                })?;
            match line {
                Some(line) => {
                    self.line_no += 1;
                    self.pending
                        .extend(line.split_whitespace().map(str::to_string));
                }
                None => return Ok(None),
            }
        }
    }
}
