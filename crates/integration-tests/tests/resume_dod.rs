//! Resume Definition of Done (DoD) Integration Tests
//!
//! Runs the attempt scheduler against real dictionary and ledger files, cuts
//! power mid-run, and verifies the next boot picks up exactly where the ledger
//! says it stopped.

use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pincrawl_core::application::{AttemptScheduler, SchedulerConfig, SchedulerPorts, StatusIndicator};
use pincrawl_core::port::keystroke_device::mocks::RecordingKeyboard;
use pincrawl_core::port::presence_gate::mocks::ScriptedPresenceGate;
use pincrawl_core::port::sleeper::mocks::RecordingSleeper;
use pincrawl_core::port::status_signal::mocks::RecordingStatusSignal;
use pincrawl_core::port::time_provider::mocks::FixedClock;
use pincrawl_core::port::{ResumeOutcome, Sleeper};
use pincrawl_infra_fs::{FileCandidateSource, FileProgressLedger};

const WIDTH: usize = 4;

/// Sleeper whose `n`th post-attempt wait never returns (power is cut during it)
struct PowerCutSleeper {
    waits_left: AtomicUsize,
}

impl PowerCutSleeper {
    fn after_waits(n: usize) -> Self {
        Self {
            waits_left: AtomicUsize::new(n),
        }
    }
}

#[async_trait]
impl Sleeper for PowerCutSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration >= Duration::from_secs(1) && self.waits_left.fetch_sub(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }
        tokio::task::yield_now().await;
    }
}

fn write_dictionary(dir: &Path, codes: &[&str]) -> std::path::PathBuf {
    let path = dir.join("PIN4.TXT");
    fs::write(&path, codes.join("\n") + "\n").unwrap();
    path
}

async fn boot(
    dictionary: &Path,
    ledger: &Path,
    keyboard: &RecordingKeyboard,
    sleeper: Arc<dyn Sleeper>,
) -> AttemptScheduler {
    let source = FileCandidateSource::open(dictionary, WIDTH).await.unwrap();
    let ledger = FileProgressLedger::open(ledger, WIDTH).await.unwrap();
    let ports = SchedulerPorts {
        source: Box::new(source),
        ledger: Box::new(ledger),
        presence: Arc::new(ScriptedPresenceGate::always_present()),
        keyboard: Arc::new(keyboard.clone()),
        sleeper: sleeper.clone(),
        clock: Arc::new(FixedClock::at(1_704_112_496_000)),
    };
    let status = StatusIndicator::new(Arc::new(RecordingStatusSignal::new()), sleeper);
    AttemptScheduler::new(ports, status, SchedulerConfig::default()).unwrap()
}

/// DoD 1: A power cut mid-run loses no progress and repeats no logged code
#[tokio::test]
async fn test_power_cut_then_resume() {
    let dir = tempfile::tempdir().unwrap();
    let codes = ["0000", "1111", "2222", "3333", "4444", "5555", "6666", "7777"];
    let dictionary = write_dictionary(dir.path(), &codes);
    let ledger_path = dir.path().join("pin.log");

    // Boot 1: power is cut during the wait after the 4th attempt
    let first_keyboard = RecordingKeyboard::new();
    let mut first = boot(
        &dictionary,
        &ledger_path,
        &first_keyboard,
        Arc::new(PowerCutSleeper::after_waits(3)),
    )
    .await;
    let cut = tokio::time::timeout(Duration::from_millis(500), first.run_until_exhausted()).await;
    assert!(cut.is_err(), "first boot should still be waiting when power is cut");
    drop(first);

    assert_eq!(first_keyboard.submitted_codes(), &codes[..4]);
    assert_eq!(
        fs::read_to_string(&ledger_path).unwrap(),
        "0000\n1111\n2222\n3333\n"
    );

    // Boot 2: resumes after the last logged code
    let second_keyboard = RecordingKeyboard::new();
    let mut second = boot(
        &dictionary,
        &ledger_path,
        &second_keyboard,
        Arc::new(RecordingSleeper::new()),
    )
    .await;
    let summary = second.run_until_exhausted().await.unwrap();

    assert_eq!(summary.resume, Some(ResumeOutcome::Resumed { skipped: 4 }));
    assert_eq!(second_keyboard.submitted_codes(), &codes[4..]);
    assert_eq!(fs::read_to_string(&ledger_path).unwrap(), codes.join("\n") + "\n");
}

/// DoD 2: A final record cut off before its newline still counts as attempted
#[tokio::test]
async fn test_unterminated_record_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = write_dictionary(dir.path(), &["1000", "1001", "1002", "1003"]);
    let ledger_path = dir.path().join("pin.log");
    fs::write(&ledger_path, "1000\n1001").unwrap();

    let keyboard = RecordingKeyboard::new();
    let mut scheduler = boot(
        &dictionary,
        &ledger_path,
        &keyboard,
        Arc::new(RecordingSleeper::new()),
    )
    .await;
    let summary = scheduler.run_until_exhausted().await.unwrap();

    assert_eq!(summary.resume, Some(ResumeOutcome::Resumed { skipped: 2 }));
    assert_eq!(keyboard.submitted_codes(), vec!["1002", "1003"]);
    assert_eq!(
        fs::read_to_string(&ledger_path).unwrap(),
        "1000\n1001\n1002\n1003\n"
    );
}

/// DoD 3: A ledger that replays the same prefix still resumes after its final entry
#[tokio::test]
async fn test_idempotent_replay() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = write_dictionary(dir.path(), &["1000", "1001", "1002"]);
    let ledger_path = dir.path().join("pin.log");
    fs::write(&ledger_path, "1000\n1001\n1000\n1001\n").unwrap();

    let keyboard = RecordingKeyboard::new();
    let mut scheduler = boot(
        &dictionary,
        &ledger_path,
        &keyboard,
        Arc::new(RecordingSleeper::new()),
    )
    .await;
    let summary = scheduler.run_until_exhausted().await.unwrap();

    assert_eq!(summary.resume, Some(ResumeOutcome::Resumed { skipped: 2 }));
    assert_eq!(keyboard.submitted_codes(), vec!["1002"]);
}

/// DoD 4: Rebooting after the dictionary is finished types nothing
#[tokio::test]
async fn test_reboot_after_exhaustion() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = write_dictionary(dir.path(), &["1000", "1001"]);
    let ledger_path = dir.path().join("pin.log");
    fs::write(&ledger_path, "1000\n1001\n").unwrap();

    let keyboard = RecordingKeyboard::new();
    let mut scheduler = boot(
        &dictionary,
        &ledger_path,
        &keyboard,
        Arc::new(RecordingSleeper::new()),
    )
    .await;
    let summary = scheduler.run_until_exhausted().await.unwrap();

    assert_eq!(summary.attempts, 0);
    assert!(keyboard.events().is_empty());
}
