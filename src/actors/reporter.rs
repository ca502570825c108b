//! ReporterActor - periodic visual reports per target
//!
//! Runs on its own coarse cadence, independent of the monitors. Each cycle
//! queries every target's full series from the shared store, renders a
//! latency curve and a status-code histogram, and delivers both charts to
//! the target's alert destination.
//!
//! A target with no recorded history produces a degenerate (empty) report
//! rather than an error, and a failure for one target never prevents the
//! remaining targets from being processed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, interval_at};
use tracing::{debug, error, instrument, warn};

use crate::config::{ReportConfig, TargetConfig};
use crate::notify::Notifier;
use crate::render;
use crate::store::HealthStore;

use super::messages::ReporterCommand;

/// Actor that periodically reports on every target
pub struct ReporterActor {
    /// All configured targets
    targets: Vec<TargetConfig>,

    /// Shared record store
    store: Arc<dyn HealthStore>,

    /// Report delivery
    notifier: Arc<dyn Notifier>,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<ReporterCommand>,

    /// Report cadence
    interval_duration: Duration,

    /// Delay before the first cycle
    initial_delay: Duration,
}

impl ReporterActor {
    pub fn new(
        targets: Vec<TargetConfig>,
        report: &ReportConfig,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
        command_rx: mpsc::Receiver<ReporterCommand>,
    ) -> Self {
        Self {
            targets,
            store,
            notifier,
            command_rx,
            interval_duration: Duration::from_secs(report.interval),
            initial_delay: Duration::from_secs(report.initial_delay),
        }
    }

    /// Run the actor's main loop
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!(
            "starting reporter (cadence {:?}, initial delay {:?})",
            self.interval_duration, self.initial_delay
        );

        let mut ticker = interval_at(Instant::now() + self.initial_delay, self.interval_duration);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        ReporterCommand::ReportNow { respond_to } => {
                            debug!("received ReportNow command");
                            self.run_cycle().await;
                            let _ = respond_to.send(Ok(()));
                        }

                        ReporterCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("reporter stopped");
    }

    /// One full report cycle over all targets
    ///
    /// Per-target errors are logged here so a bad target cannot abort the
    /// rest of the cycle.
    async fn run_cycle(&self) {
        debug!("running report cycle for {} targets", self.targets.len());

        for target in &self.targets {
            if let Err(e) = self.report_target(target).await {
                error!("report cycle failed for {}: {:#}", target.url, e);
            }
        }
    }

    /// Query, render and deliver the report for one target
    #[instrument(skip(self, target), fields(target = %target.url))]
    async fn report_target(&self, target: &TargetConfig) -> Result<()> {
        let records = self
            .store
            .query(&target.url)
            .await
            .context("failed to query health records")?;

        debug!("rendering report ({} records)", records.len());

        let latency_chart = render::latency_chart(&target.url, &records)
            .context("failed to render latency chart")?;
        self.notifier
            .send_attachment(&target.alert, "latency.svg", latency_chart, render::MIME_SVG)
            .await;

        let histogram = render::status_histogram(&target.url, &records)
            .context("failed to render status histogram")?;
        self.notifier
            .send_attachment(
                &target.alert,
                "status_codes.svg",
                histogram,
                render::MIME_SVG,
            )
            .await;

        Ok(())
    }
}

/// Handle for controlling the ReporterActor
#[derive(Clone)]
pub struct ReporterHandle {
    sender: mpsc::Sender<ReporterCommand>,
}

impl ReporterHandle {
    /// Spawn a new reporter actor
    pub fn spawn(
        targets: Vec<TargetConfig>,
        report: &ReportConfig,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let actor = ReporterActor::new(targets, report, store, notifier, cmd_rx);

        tokio::spawn(actor.run());

        Self { sender: cmd_tx }
    }

    /// Run a report cycle immediately
    pub async fn report_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ReporterCommand::ReportNow { respond_to: tx })
            .await?;

        rx.await??;
        Ok(())
    }

    /// Shut down the reporter
    pub async fn shutdown(self) {
        let _ = self.sender.send(ReporterCommand::Shutdown).await;
    }
}
