pub mod actors;
pub mod config;
pub mod notify;
pub mod probe;
pub mod render;
pub mod store;
pub mod supervisor;

use serde::{Deserialize, Serialize};

/// Result of a single probe attempt against a target.
///
/// A completed HTTP response is always a `Success`, no matter which status
/// code came back. Only transport-level failures (timeout, DNS, refused
/// connection, TLS) count as `Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Success { status_code: u16, latency_ms: u64 },
    Failure { reason: String },
}

impl ProbeResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            ProbeResult::Success { .. } => Outcome::Up,
            ProbeResult::Failure { .. } => Outcome::Down,
        }
    }
}

/// Liveness classification of a probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Up,
    Down,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Up => write!(f, "up"),
            Outcome::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Outcome::Up),
            "down" => Ok(Outcome::Down),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// One time-series entry, produced once per monitor iteration.
///
/// Records are append-only: monitors only ever add records, and within a
/// single target's series they are strictly insertion-ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Target identity (the probed URL)
    pub target: String,

    /// Epoch seconds at classification time
    pub timestamp: i64,

    /// HTTP status code, if a response completed
    pub status_code: Option<u16>,

    /// Wall-clock request latency in whole milliseconds, if a response completed
    pub latency_ms: Option<u64>,

    /// Up/Down classification for this iteration
    pub outcome: Outcome,
}

impl HealthRecord {
    /// Build the record for one probe attempt.
    pub fn from_probe(target: &str, timestamp: i64, result: &ProbeResult) -> Self {
        let (status_code, latency_ms) = match result {
            ProbeResult::Success {
                status_code,
                latency_ms,
            } => (Some(*status_code), Some(*latency_ms)),
            ProbeResult::Failure { .. } => (None, None),
        };

        Self {
            target: target.to_string(),
            timestamp,
            status_code,
            latency_ms,
            outcome: result.outcome(),
        }
    }
}
