//! Concurrency tests: monitors are independent and per-target series stay
//! insertion-ordered no matter what other targets are doing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use watchtower::ProbeResult;
use watchtower::actors::monitor::MonitorHandle;
use watchtower::probe::Prober;
use watchtower::store::{HealthStore, MemoryStore};

use crate::helpers::{RecordingNotifier, ScriptedProbe, target, up};

/// Probe that takes a long time to answer.
struct SlowProbe {
    delay: Duration,
}

#[async_trait]
impl Prober for SlowProbe {
    async fn check(&self, _url: &str) -> ProbeResult {
        tokio::time::sleep(self.delay).await;
        ProbeResult::Success {
            status_code: 200,
            latency_ms: self.delay.as_millis() as u64,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_probe_does_not_delay_other_monitors() {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let slow = MonitorHandle::spawn(
        target("http://slow", 60),
        Arc::new(SlowProbe {
            delay: Duration::from_secs(30),
        }),
        store.clone(),
        notifier.clone(),
    );
    let fast = MonitorHandle::spawn(
        target("http://fast", 60),
        Arc::new(ScriptedProbe::new(vec![up(200, 1)])),
        store.clone(),
        notifier.clone(),
    );

    // Kick off a 30s probe on the slow target
    let slow_check = tokio::spawn({
        let slow = slow.clone();
        async move { slow.check_now().await }
    });
    tokio::task::yield_now().await;

    // The fast target keeps completing iterations while the slow probe hangs
    for _ in 0..3 {
        fast.check_now().await.unwrap();
    }
    assert_eq!(store.query("http://fast").await.unwrap().len(), 3);

    // Let the slow probe finish
    slow_check.await.unwrap().unwrap();
    assert_eq!(store.query("http://slow").await.unwrap().len(), 1);

    slow.shutdown().await;
    fast.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_monitors_keep_series_ordered_per_target() {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let a = MonitorHandle::spawn(
        target("http://svc-a", 1),
        Arc::new(ScriptedProbe::new(vec![up(200, 5)])),
        store.clone(),
        notifier.clone(),
    );
    let b = MonitorHandle::spawn(
        target("http://svc-b", 2),
        Arc::new(ScriptedProbe::new(vec![up(204, 7)])),
        store.clone(),
        notifier.clone(),
    );

    tokio::time::sleep(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;

    for (url, expected_status) in [("http://svc-a", 200u16), ("http://svc-b", 204u16)] {
        let series = store.query(url).await.unwrap();
        assert!(!series.is_empty());

        // Individually ordered: timestamps monotonically non-decreasing
        let timestamps: Vec<i64> = series.iter().map(|r| r.timestamp).collect();
        assert!(
            timestamps.windows(2).all(|pair| pair[0] <= pair[1]),
            "series for {url} not insertion-ordered: {timestamps:?}"
        );

        // No cross-target interleaving inside a series
        for record in &series {
            assert_eq!(record.target, url);
            assert_eq!(record.status_code, Some(expected_status));
        }
    }

    // A polls twice as often as B
    let a_count = store.query("http://svc-a").await.unwrap().len();
    let b_count = store.query("http://svc-b").await.unwrap().len();
    assert!(
        a_count > b_count,
        "expected faster target to record more probes ({a_count} vs {b_count})"
    );

    a.shutdown().await;
    b.shutdown().await;
}
