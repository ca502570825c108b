//! Record store trait definition

use async_trait::async_trait;

use crate::HealthRecord;

use super::error::StoreResult;

/// Append-only time-series sink for health records.
///
/// Implementations must be `Send + Sync`: one shared handle is used
/// concurrently by every monitor (appends) and by the reporter (reads).
/// A single `append` must be atomic - concurrent appends may interleave
/// between records, never within one.
///
/// Records are never mutated or deleted through this interface, and
/// `query` returns a target's series in insertion order.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Append one record to its target's series.
    async fn append(&self, record: HealthRecord) -> StoreResult<()>;

    /// Fetch the full series for a target, in insertion order.
    ///
    /// An unknown target yields an empty series, not an error.
    async fn query(&self, target: &str) -> StoreResult<Vec<HealthRecord>>;

    /// Release backend resources.
    async fn close(&self) -> StoreResult<()>;
}
