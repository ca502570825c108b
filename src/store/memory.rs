//! In-memory record store (no persistence)
//!
//! Used for `storage: none` deployments and as the default test double.
//! All data is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::HealthRecord;

use super::backend::HealthStore;
use super::error::StoreResult;

/// Record store keeping every series in a process-local map.
pub struct MemoryStore {
    series: RwLock<HashMap<String, Vec<HealthRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            series: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthStore for MemoryStore {
    async fn append(&self, record: HealthRecord) -> StoreResult<()> {
        let mut series = self.series.write().await;
        series
            .entry(record.target.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn query(&self, target: &str) -> StoreResult<Vec<HealthRecord>> {
        let series = self.series.read().await;
        Ok(series.get(target).cloned().unwrap_or_default())
    }

    async fn close(&self) -> StoreResult<()> {
        debug!("closing in-memory store (no-op)");
        Ok(())
    }
}
