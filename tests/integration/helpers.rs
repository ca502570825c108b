//! Shared test doubles for the integration tests

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use watchtower::config::{Alert, TargetConfig, Webhook};
use watchtower::notify::Notifier;
use watchtower::probe::Prober;
use watchtower::store::{HealthStore, MemoryStore, StoreError, StoreResult};
use watchtower::{HealthRecord, ProbeResult};

pub fn up(status_code: u16, latency_ms: u64) -> ProbeResult {
    ProbeResult::Success {
        status_code,
        latency_ms,
    }
}

pub fn down(reason: &str) -> ProbeResult {
    ProbeResult::Failure {
        reason: reason.to_string(),
    }
}

pub fn target(url: &str, interval: u64) -> TargetConfig {
    TargetConfig {
        url: url.to_string(),
        interval,
        timeout: 10,
        alert: Alert::Webhook(Webhook {
            url: format!("https://hooks.example/{url}"),
        }),
    }
}

/// Probe that replays a fixed script of results.
///
/// Once the script is exhausted the last result repeats forever, so the
/// probe can also drive open-ended ticker runs.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<ProbeResult>>,
    last: Mutex<ProbeResult>,
}

impl ScriptedProbe {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        let last = results
            .last()
            .cloned()
            .unwrap_or_else(|| down("empty script"));
        Self {
            script: Mutex::new(results.into()),
            last: Mutex::new(last),
        }
    }
}

#[async_trait]
impl Prober for ScriptedProbe {
    async fn check(&self, _url: &str) -> ProbeResult {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(result) => result,
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Notifier that records every delivery instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    attachments: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(String, String)> {
        self.attachments.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, _alert: &Alert, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    async fn send_attachment(&self, _alert: &Alert, filename: &str, _bytes: Vec<u8>, mime: &str) {
        self.attachments
            .lock()
            .unwrap()
            .push((filename.to_string(), mime.to_string()));
    }
}

/// Store wrapper that fails specific append attempts (1-based, counted
/// across all targets) and otherwise delegates to a MemoryStore.
pub struct FlakyStore {
    inner: MemoryStore,
    fail_on: HashSet<usize>,
    attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_on(attempts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on: attempts.into_iter().collect(),
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HealthStore for FlakyStore {
    async fn append(&self, record: HealthRecord) -> StoreResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&attempt) {
            return Err(StoreError::WriteFailed(format!(
                "injected failure on append #{attempt}"
            )));
        }
        self.inner.append(record).await
    }

    async fn query(&self, target: &str) -> StoreResult<Vec<HealthRecord>> {
        self.inner.query(target).await
    }

    async fn close(&self) -> StoreResult<()> {
        self.inner.close().await
    }
}

/// Store wrapper whose queries fail for one specific target.
pub struct QueryFailStore {
    inner: MemoryStore,
    fail_target: String,
}

impl QueryFailStore {
    pub fn failing_for(fail_target: &str) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_target: fail_target.to_string(),
        }
    }
}

#[async_trait]
impl HealthStore for QueryFailStore {
    async fn append(&self, record: HealthRecord) -> StoreResult<()> {
        self.inner.append(record).await
    }

    async fn query(&self, target: &str) -> StoreResult<Vec<HealthRecord>> {
        if target == self.fail_target {
            return Err(StoreError::QueryFailed(format!(
                "injected query failure for {target}"
            )));
        }
        self.inner.query(target).await
    }

    async fn close(&self) -> StoreResult<()> {
        self.inner.close().await
    }
}
