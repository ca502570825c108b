//! HTTP probing of monitored targets
//!
//! A probe issues exactly one outbound GET per call and never raises to the
//! caller: transport-level failures come back as `ProbeResult::Failure`,
//! completed responses (including 4xx/5xx) as `ProbeResult::Success`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::trace;

use crate::ProbeResult;

/// Probing capability, injected into each monitor.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Perform one synchronous check against `url`.
    async fn check(&self, url: &str) -> ProbeResult;
}

/// Probe implementation backed by a reqwest client.
///
/// The client is built once and reused across requests. The timeout bounds
/// the whole request/response cycle.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProbe {
    async fn check(&self, url: &str) -> ProbeResult {
        trace!("probing {url}");

        let start = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return ProbeResult::Failure {
                    reason: e.to_string(),
                };
            }
        };

        let status_code = response.status().as_u16();

        // Drain the body so latency covers the full cycle
        if let Err(e) = response.bytes().await {
            return ProbeResult::Failure {
                reason: e.to_string(),
            };
        }

        let latency_ms = start.elapsed().as_millis() as u64;

        trace!("{url}: responded {status_code} in {latency_ms}ms");

        ProbeResult::Success {
            status_code,
            latency_ms,
        }
    }
}
