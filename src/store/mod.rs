//! Record stores for health persistence
//!
//! This module provides a trait-based abstraction for the append-only
//! time-series sink shared by all monitors and the reporter.
//!
//! ## Backends
//!
//! - **SQLite** (default): embedded persistence, WAL mode
//! - **In-Memory**: no persistence, for testing and `storage: none`

pub mod backend;
pub mod error;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use crate::config::StorageConfig;

pub use backend::HealthStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Build the store handle described by the configuration.
pub async fn from_config(config: &StorageConfig) -> StoreResult<Arc<dyn HealthStore>> {
    match config {
        StorageConfig::None => Ok(Arc::new(MemoryStore::new())),
        StorageConfig::Sqlite { path } => Ok(Arc::new(SqliteStore::new(path).await?)),
    }
}
