//! MonitorActor - the per-target polling/recording/alerting loop
//!
//! One monitor per configured target, running for the process lifetime.
//! Every iteration independently re-derives the Up/Down outcome from a fresh
//! probe result (no state is carried between iterations), appends exactly
//! one record, and sends exactly one notification when the outcome is Down.
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → probe → classify → alert if Down → append record
//!     ↑
//!     └─── Commands (CheckNow, Shutdown)
//! ```
//!
//! Probe failures are data, not control-flow errors: a transport failure
//! becomes a Down record, never an escalated fault. Store and notifier
//! failures are logged and the loop continues. Any other per-iteration
//! fault is caught at the select arm, so a single bad iteration can never
//! kill a target's monitoring.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, interval_at};
use tracing::{debug, error, info, instrument, warn};

use crate::config::TargetConfig;
use crate::notify::Notifier;
use crate::probe::Prober;
use crate::store::HealthStore;
use crate::{HealthRecord, ProbeResult};

use super::messages::MonitorCommand;

/// Actor that monitors a single target endpoint
pub struct MonitorActor {
    /// Target configuration
    target: TargetConfig,

    /// Probing capability
    probe: Arc<dyn Prober>,

    /// Shared record store
    store: Arc<dyn HealthStore>,

    /// Alert delivery
    notifier: Arc<dyn Notifier>,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<MonitorCommand>,

    /// Poll interval
    interval_duration: Duration,
}

impl MonitorActor {
    pub fn new(
        target: TargetConfig,
        probe: Arc<dyn Prober>,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
        command_rx: mpsc::Receiver<MonitorCommand>,
    ) -> Self {
        let interval_duration = Duration::from_secs(target.interval);

        Self {
            target,
            probe,
            store,
            notifier,
            command_rx,
            interval_duration,
        }
    }

    /// Run the actor's main loop
    ///
    /// Runs until a Shutdown command is received or the command channel is
    /// closed. The loop itself never exits on an iteration fault.
    #[instrument(skip(self), fields(target = %self.target.url))]
    pub async fn run(mut self) {
        debug!("starting monitor");

        // First probe happens one full interval after startup
        let mut ticker = interval_at(
            Instant::now() + self.interval_duration,
            self.interval_duration,
        );

        loop {
            tokio::select! {
                // Timer tick - perform one probe iteration
                _ = ticker.tick() => {
                    if let Err(e) = self.run_iteration().await {
                        error!("monitor iteration failed: {:#}", e);
                    }
                }

                // Handle commands
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        MonitorCommand::CheckNow { respond_to } => {
                            debug!("received CheckNow command");
                            let result = self.run_iteration().await;
                            let _ = respond_to.send(result);
                        }

                        MonitorCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                // Command channel closed - exit
                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("monitor stopped");
    }

    /// One probe → classify → alert → record iteration
    #[instrument(skip(self), fields(target = %self.target.url))]
    async fn run_iteration(&self) -> Result<()> {
        let url = &self.target.url;

        let result = self.probe.check(url).await;
        let record = HealthRecord::from_probe(url, Utc::now().timestamp(), &result);

        match &result {
            ProbeResult::Success {
                status_code,
                latency_ms,
            } => {
                info!("{url} is up! Status code: {status_code}, response time: {latency_ms} ms");
            }
            ProbeResult::Failure { reason } => {
                warn!("{url} is down: {reason}");
                self.notifier
                    .send(&self.target.alert, &format!("{url} is down!"))
                    .await;
            }
        }

        if let Err(e) = self.store.append(record).await {
            error!("failed to append health record for {url}: {e}");
        }

        Ok(())
    }
}

/// Handle for controlling a MonitorActor
#[derive(Clone)]
pub struct MonitorHandle {
    sender: mpsc::Sender<MonitorCommand>,
    target_url: String,
}

impl MonitorHandle {
    /// Spawn a new monitor actor for one target
    pub fn spawn(
        target: TargetConfig,
        probe: Arc<dyn Prober>,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let target_url = target.url.clone();

        let actor = MonitorActor::new(target, probe, store, notifier, cmd_rx);

        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            target_url,
        }
    }

    /// Trigger an immediate probe iteration
    pub async fn check_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(MonitorCommand::CheckNow { respond_to: tx })
            .await?;

        rx.await??;
        Ok(())
    }

    /// Shut down the monitor
    pub async fn shutdown(self) {
        let _ = self.sender.send(MonitorCommand::Shutdown).await;
    }

    /// Get the monitored target URL
    pub fn target_url(&self) -> &str {
        &self.target_url
    }
}
