//! Message types for actor communication
//!
//! Commands are request/response messages sent to a specific actor over its
//! mpsc channel; oneshot channels carry the response where one is needed.

use tokio::sync::oneshot;

/// Commands that can be sent to a MonitorActor
#[derive(Debug)]
pub enum MonitorCommand {
    /// Trigger an immediate probe iteration (bypassing the interval timer)
    ///
    /// Used for testing and manual refresh operations.
    CheckNow {
        /// Channel to send the result back
        respond_to: oneshot::Sender<anyhow::Result<()>>,
    },

    /// Gracefully shut down the monitor
    ///
    /// The actor will finish any in-flight iteration and then exit.
    Shutdown,
}

/// Commands that can be sent to the ReporterActor
#[derive(Debug)]
pub enum ReporterCommand {
    /// Run a full report cycle immediately (bypassing the cadence timer)
    ReportNow {
        /// Channel to send the result back
        respond_to: oneshot::Sender<anyhow::Result<()>>,
    },

    /// Gracefully shut down the reporter
    Shutdown,
}
