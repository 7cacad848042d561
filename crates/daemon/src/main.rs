//! pincrawl - Main Entry Point
//! Types dictionary codes into the attached host as a USB keyboard, pacing
//! attempts around the host's lockout and resuming from the ledger after power loss.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use pincrawl_core::application::{AttemptScheduler, SchedulerConfig, SchedulerPorts, StatusIndicator};
use pincrawl_core::port::{StatusSignal, SystemTimeProvider, TokioSleeper};
use pincrawl_infra_fs::{FileCandidateSource, FileProgressLedger};
use pincrawl_infra_system::udc::UDC_CLASS_DIR;
use pincrawl_infra_system::{HidGadgetKeyboard, SysfsLed, TracingStatusSignal, UdcPresenceGate};

use crate::config::DaemonConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration and logging
    let config = DaemonConfig::from_env();
    let _log_guard = telemetry::init_logging(&config)?;

    info!("pincrawl v{} starting...", VERSION);

    // 2. Status output goes solid for bring-up
    let sleeper = Arc::new(TokioSleeper);
    let signal: Arc<dyn StatusSignal> = match &config.led_path {
        Some(path) => {
            info!(path = %path.display(), "Using LED for status");
            Arc::new(SysfsLed::new(path))
        }
        None => Arc::new(TracingStatusSignal),
    };
    let status = StatusIndicator::new(signal, sleeper.clone());

    // 3. Durable resources (failure here is fatal before any attempt)
    let scheduler_config = SchedulerConfig::default();
    let source = FileCandidateSource::open(&config.dictionary_path, scheduler_config.candidate_width)
        .await
        .context("Dictionary unavailable")?;
    let ledger = FileProgressLedger::open(&config.ledger_path, scheduler_config.candidate_width)
        .await
        .context("Progress ledger unavailable")?;

    // 4. Devices
    let udc_state_path = config
        .udc_state_path
        .clone()
        .or_else(|| UdcPresenceGate::discover(UDC_CLASS_DIR))
        .context("No USB device controller found (set PINCRAWL_UDC_STATE_PATH)")?;
    info!(
        hidg = %config.hidg_path.display(),
        udc_state = %udc_state_path.display(),
        "Devices configured"
    );

    // 5. Setup dependencies (DI wiring)
    let ports = SchedulerPorts {
        source: Box::new(source),
        ledger: Box::new(ledger),
        presence: Arc::new(UdcPresenceGate::new(udc_state_path)),
        keyboard: Arc::new(HidGadgetKeyboard::new(&config.hidg_path)),
        sleeper,
        clock: Arc::new(SystemTimeProvider),
    };
    let scheduler = AttemptScheduler::new(ports, status, scheduler_config)?;

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Run until a fatal error or the shutdown signal
    tokio::select! {
        result = scheduler.run() => {
            match result.context("Attempt scheduler failed")? {}
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting.");
        }
    }

    Ok(())
}
