//! Attempt Scheduler - drives the whole run
//!
//! State machine:
//! `Init -> Resuming -> WaitingForPresence <-> Attempting -> Exhausted`
//!
//! - Init: read the ledger checkpoint
//! - Resuming: skip the dictionary past the checkpoint
//! - WaitingForPresence: poll the presence gate, blinking the indicator
//! - Attempting: emit, append to ledger, back off, sleep
//! - Exhausted: terminal, done pattern forever
//!
//! Ordering: the ledger append for an attempt happens before its wait. The
//! next candidate is pulled before the presence check, so reaching the end of
//! the dictionary never waits on the consumer. A candidate pulled while the
//! consumer is absent is not logged until typed.

pub mod constants;


use crate::application::backoff::{BackoffPolicy, BackoffState};
use crate::application::config::SchedulerConfig;
use crate::application::emission::emit_candidate;
use crate::application::status::StatusIndicator;
use crate::domain::{Candidate, LedgerEntry};
use crate::error::Result;
use crate::port::{
    CandidateSource, KeystrokeDevice, PresenceGate, ProgressLedger, ResumeOutcome, Sleeper,
    TimeProvider,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Scheduler states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Init,
    Resuming,
    WaitingForPresence,
    Attempting,
    Exhausted,
}

/// Collaborators the scheduler drives
///
/// Source and ledger are opened by the caller; an open failure is fatal
/// before the scheduler exists.
pub struct SchedulerPorts {
    pub source: Box<dyn CandidateSource>,
    pub ledger: Box<dyn ProgressLedger>,
    pub presence: Arc<dyn PresenceGate>,
    pub keyboard: Arc<dyn KeystrokeDevice>,
    pub sleeper: Arc<dyn Sleeper>,
    pub clock: Arc<dyn TimeProvider>,
}

/// What a run did before reaching `Exhausted`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ledger checkpoint found at start-up
    pub checkpoint: Option<Candidate>,
    /// Outcome of skipping past the checkpoint, if there was one
    pub resume: Option<ResumeOutcome>,
    /// Candidates emitted in this run
    pub attempts: u64,
    pub last_attempted: Option<Candidate>,
    /// Appends that failed; those candidates may be retried after a restart
    pub ledger_failures: u64,
    /// Key events the keyboard rejected
    pub rejected_key_events: u64,
    /// Base timeout in force when the run ended
    pub base_timeout: Duration,
}

pub struct AttemptScheduler {
    source: Box<dyn CandidateSource>,
    ledger: Box<dyn ProgressLedger>,
    presence: Arc<dyn PresenceGate>,
    keyboard: Arc<dyn KeystrokeDevice>,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn TimeProvider>,
    status: StatusIndicator,
    config: SchedulerConfig,
    policy: BackoffPolicy,
    backoff: BackoffState,
    state: SchedulerState,
    summary: RunSummary,
}

impl AttemptScheduler {
    /// Create a scheduler in `Init`
    ///
    /// # Errors
    /// - AppError::Config if `config` fails validation
    pub fn new(
        ports: SchedulerPorts,
        status: StatusIndicator,
        config: SchedulerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let policy = BackoffPolicy::new(config.backoff);
        let backoff = policy.initial_state();

        Ok(Self {
            source: ports.source,
            ledger: ports.ledger,
            presence: ports.presence,
            keyboard: ports.keyboard,
            sleeper: ports.sleeper,
            clock: ports.clock,
            status,
            config,
            policy,
            backoff,
            state: SchedulerState::Init,
            summary: RunSummary::default(),
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn backoff(&self) -> BackoffState {
        self.backoff
    }

    /// Run every remaining candidate, then enter the done pattern forever
    pub async fn run(mut self) -> Result<Infallible> {
        let summary = self.run_until_exhausted().await?;
        info!(
            attempts = summary.attempts,
            last_attempted = ?summary.last_attempted.map(|c| c.to_string()),
            "Dictionary exhausted, signalling done"
        );
        Ok(self.status.signal_done_forever().await)
    }

    /// Drive the state machine until `Exhausted`
    ///
    /// # Errors
    /// - AppError::Read if the ledger or dictionary cannot be read
    pub async fn run_until_exhausted(&mut self) -> Result<RunSummary> {
        self.state = SchedulerState::Init;
        let checkpoint = self.ledger.last_entry().await?;
        self.summary.checkpoint = checkpoint;

        self.state = SchedulerState::Resuming;
        match checkpoint {
            Some(last) => {
                info!(checkpoint = %last, "Resuming after last attempted candidate");
                let outcome = self.source.resume_to(last).await?;
                self.summary.resume = Some(outcome);
                if let ResumeOutcome::NotFound { scanned } = outcome {
                    // Dictionary changed between runs or the ledger is corrupt
                    error!(
                        checkpoint = %last,
                        scanned = scanned,
                        "Checkpoint missing from dictionary, treating dictionary as exhausted"
                    );
                    return Ok(self.exhaust());
                }
            }
            None => info!("No previous attempts recorded, starting from the top"),
        }

        while let Some(candidate) = self.source.next().await? {
            self.state = SchedulerState::WaitingForPresence;
            self.wait_for_presence().await;

            self.state = SchedulerState::Attempting;
            self.status.attempting();
            self.attempt(candidate).await;
        }

        Ok(self.exhaust())
    }

    async fn wait_for_presence(&mut self) {
        let mut polls = 0u64;
        while !self.presence.is_present().await {
            if polls == 0 {
                info!("Keyboard consumer absent, waiting");
            }
            polls += 1;
            self.status.toggle_waiting();
            self.sleeper.sleep(self.config.poll_interval).await;
        }
        if polls > 0 {
            info!(polls = polls, "Keyboard consumer present");
        }
    }

    async fn attempt(&mut self, candidate: Candidate) {
        let entry = LedgerEntry::new(candidate, self.clock.now_millis());
        self.summary.attempts += 1;
        info!(
            candidate = %candidate,
            at = %entry.time_of_day(),
            attempt = self.summary.attempts,
            "Trying candidate"
        );

        let rejected = emit_candidate(
            self.keyboard.as_ref(),
            self.sleeper.as_ref(),
            &candidate,
            &self.config.key_timing,
        )
        .await;
        if rejected > 0 {
            warn!(candidate = %candidate, rejected = rejected, "Candidate partially delivered");
            self.summary.rejected_key_events += rejected as u64;
        }

        // Not fatal: the candidate has already been typed
        if let Err(e) = self.ledger.append(&entry).await {
            self.summary.ledger_failures += 1;
            error!(candidate = %candidate, error = %e, "Failed to record attempt");
        }
        self.summary.last_attempted = Some(candidate);

        let (next, wait) = self.policy.after_attempt(self.backoff);
        self.backoff = next;
        debug!(
            candidate = %candidate,
            wait_ms = wait.duration().as_millis() as u64,
            lockout = wait.is_lockout(),
            "Waiting before next attempt"
        );
        self.sleeper.sleep(wait.duration()).await;
    }

    fn exhaust(&mut self) -> RunSummary {
        self.state = SchedulerState::Exhausted;
        self.summary.base_timeout = self.backoff.base_timeout;
        info!(
            attempts = self.summary.attempts,
            ledger_failures = self.summary.ledger_failures,
            "Scheduler exhausted"
        );
        self.summary.clone()
    }
}
