// Append-only ProgressLedger backed by a plain text file
//
// One zero-padded candidate plus '\n' per attempt. Each append is flushed and
// synced before returning. Existing bytes are never rewritten.

use async_trait::async_trait;
use pincrawl_core::domain::{Candidate, LedgerEntry};
use pincrawl_core::error::{AppError, Result};
use pincrawl_core::port::ProgressLedger;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct FileProgressLedger {
    path: PathBuf,
    width: usize,
    // File ended without a separator at open; the next record starts on a new line
    needs_separator: bool,
}

impl FileProgressLedger {
    /// Open (creating if needed) the ledger at `path`
    ///
    /// The file is opened once here to confirm it is writable. Every append
    /// reopens it so a transient failure on one record does not poison later
    /// ones.
    pub async fn open(path: impl AsRef<Path>, width: usize) -> Result<Self> {
        Candidate::new(0, width)?;

        let path = path.as_ref().to_path_buf();
        let open_error = |source| AppError::Open {
            path: path.clone(),
            source,
        };
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(open_error)?;
        let existing = fs::read(&path).await.map_err(open_error)?;
        let needs_separator = existing
            .last()
            .is_some_and(|byte| !byte.is_ascii_whitespace());
        if needs_separator {
            warn!(path = %path.display(), "Ledger does not end with a newline");
        }
        info!(path = %path.display(), bytes = existing.len(), "Opened progress ledger");

        Ok(Self {
            path,
            width,
            needs_separator,
        })
    }

    async fn write_record(&self, record: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        if self.needs_separator {
            file.write_all(b"\n").await?;
        }
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await
    }
}

#[async_trait]
impl ProgressLedger for FileProgressLedger {
    async fn append(&mut self, entry: &LedgerEntry) -> Result<()> {
        self.write_record(&entry.to_record())
            .await
            .map_err(|source| AppError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.needs_separator = false;
        debug!(
            candidate = %entry.candidate,
            at = %entry.time_of_day(),
            "Ledger entry appended"
        );
        Ok(())
    }

    async fn last_entry(&self) -> Result<Option<Candidate>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AppError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        Ok(last_candidate(&String::from_utf8_lossy(&bytes), self.width))
    }
}

/// Last whitespace-separated token that parses as a candidate
fn last_candidate(text: &str, width: usize) -> Option<Candidate> {
    text.split_ascii_whitespace()
        .rev()
        .find_map(|token| Candidate::parse(token, width).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::tempdir;

    fn pin(token: &str) -> Candidate {
        Candidate::parse(token, 4).unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_ledger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");

        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        assert!(path.exists());
        assert_eq!(ledger.last_entry().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_append_writes_padded_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        let mut ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        tokio_test::assert_ok!(ledger.append(&LedgerEntry::new(pin("0031"), 0)).await);
        tokio_test::assert_ok!(ledger.append(&LedgerEntry::new(pin("1234"), 1)).await);

        assert_eq!(std_fs::read_to_string(&path).unwrap(), "0031\n1234\n");
        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("1234")));
    }

    #[tokio::test]
    async fn test_append_preserves_existing_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "0000\n0001\n").unwrap();

        let mut ledger = FileProgressLedger::open(&path, 4).await.unwrap();
        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("0001")));

        ledger.append(&LedgerEntry::new(pin("0002"), 0)).await.unwrap();

        assert_eq!(std_fs::read_to_string(&path).unwrap(), "0000\n0001\n0002\n");
    }

    #[tokio::test]
    async fn test_unterminated_last_record_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "0000\n0001").unwrap();

        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("0001")));
        assert_eq!(std_fs::read_to_string(&path).unwrap(), "0000\n0001");
    }

    #[tokio::test]
    async fn test_append_after_unterminated_record_starts_new_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "0000\n0001").unwrap();

        let mut ledger = FileProgressLedger::open(&path, 4).await.unwrap();
        tokio_test::assert_ok!(ledger.append(&LedgerEntry::new(pin("0002"), 0)).await);
        tokio_test::assert_ok!(ledger.append(&LedgerEntry::new(pin("0003"), 0)).await);

        assert_eq!(
            std_fs::read_to_string(&path).unwrap(),
            "0000\n0001\n0002\n0003\n"
        );
        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("0003")));
    }

    #[tokio::test]
    async fn test_short_final_token_parses_as_padded_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "0000\n0001\n12").unwrap();

        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("0012")));
    }

    #[tokio::test]
    async fn test_single_record_without_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "1234").unwrap();

        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("1234")));
    }

    #[tokio::test]
    async fn test_garbage_lines_fall_back_to_last_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        std_fs::write(&path, "0100\r\n0101\nxyz\n\n").unwrap();

        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        assert_eq!(ledger.last_entry().await.unwrap(), Some(pin("0101")));
    }

    #[tokio::test]
    async fn test_ledger_deleted_after_open_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        let ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        std_fs::remove_file(&path).unwrap();

        assert_eq!(ledger.last_entry().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_append_to_unwritable_path_is_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pin.log");
        let mut ledger = FileProgressLedger::open(&path, 4).await.unwrap();

        // Replace the file with a directory so reopening for append fails
        std_fs::remove_file(&path).unwrap();
        std_fs::create_dir(&path).unwrap();

        let result = ledger.append(&LedgerEntry::new(pin("0000"), 0)).await;

        assert!(matches!(result, Err(AppError::Write { .. })));
    }

    #[tokio::test]
    async fn test_open_in_missing_directory_fails() {
        let dir = tempdir().unwrap();

        let err =
            tokio_test::assert_err!(FileProgressLedger::open(dir.path().join("nope/pin.log"), 4).await);

        assert!(matches!(err, AppError::Open { .. }));
    }
}
