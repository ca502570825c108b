//! Supervisor - spawns and owns the monitor and reporter actors
//!
//! Loads nothing itself: it receives the parsed configuration plus the
//! probe, store and notifier capabilities, spawns one monitor task per
//! configured target and one reporter task, and keeps the handles for the
//! process lifetime. Monitors are independent tokio tasks, so one target's
//! slow probe or iteration fault never delays another's.

use std::sync::Arc;

use tracing::{debug, info};

use crate::actors::monitor::MonitorHandle;
use crate::actors::reporter::ReporterHandle;
use crate::config::Config;
use crate::notify::Notifier;
use crate::probe::Prober;
use crate::store::HealthStore;

pub struct Supervisor {
    monitors: Vec<MonitorHandle>,
    reporter: ReporterHandle,
}

impl Supervisor {
    /// Spawn one monitor per target plus the reporter.
    pub fn start(
        config: &Config,
        probes: Vec<Arc<dyn Prober>>,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        debug_assert_eq!(config.targets.len(), probes.len());

        let monitors: Vec<MonitorHandle> = config
            .targets
            .iter()
            .zip(probes)
            .map(|(target, probe)| {
                debug!(
                    "spawning monitor for {} (interval {}s)",
                    target.url, target.interval
                );
                MonitorHandle::spawn(target.clone(), probe, store.clone(), notifier.clone())
            })
            .collect();

        let report = config.report.clone().unwrap_or_default();
        let reporter = ReporterHandle::spawn(
            config.targets.clone(),
            &report,
            store.clone(),
            notifier.clone(),
        );

        info!("supervising {} monitors", monitors.len());

        Self { monitors, reporter }
    }

    pub fn monitors(&self) -> &[MonitorHandle] {
        &self.monitors
    }

    /// Cooperatively shut down every actor.
    pub async fn shutdown(self) {
        debug!("shutting down supervisor");

        for monitor in self.monitors {
            monitor.shutdown().await;
        }
        self.reporter.shutdown().await;
    }
}
