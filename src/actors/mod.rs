//! Actor-based monitoring system
//!
//! Each actor runs as an independent async task communicating via Tokio
//! channels.
//!
//! ## Architecture Overview
//!
//! ```text
//!              ┌─────────────────┐
//!              │   Supervisor    │
//!              └────────┬────────┘
//!                       │ spawns
//!        ┌──────────────┼────────────────┐
//!        │              │                │
//! ┌──────▼──────┐ ┌─────▼───────┐ ┌──────▼───────┐
//! │ Monitor-1   │ │ Monitor-N   │ │  Reporter    │
//! │ (Target A)  │ │ (Target N)  │ │ (own cadence)│
//! └──────┬──────┘ └─────┬───────┘ └──────┬───────┘
//!        │ append       │ append         │ query
//!        └──────────────┼────────────────┘
//!                       │
//!             ┌─────────▼─────────┐
//!             │ Arc<dyn Health-   │
//!             │ Store> (shared)   │
//!             └───────────────────┘
//! ```
//!
//! ## Actor Types
//!
//! - **MonitorActor**: probes one target at its configured interval,
//!   classifies Up/Down, appends a record, alerts on Down
//! - **ReporterActor**: periodically renders and delivers per-target reports
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: Each actor has an mpsc command channel for control messages
//! 2. **Request/Response**: oneshot channels for synchronous triggers

pub mod messages;
pub mod monitor;
pub mod reporter;
