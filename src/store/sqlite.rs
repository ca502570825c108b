//! SQLite record store
//!
//! Embedded persistence, suitable for a single monitoring process with a
//! moderate number of targets. The database runs in WAL mode so the
//! reporter can read while monitors append. Each append is a single-row
//! INSERT, which SQLite applies atomically.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info, instrument};

use crate::{HealthRecord, Outcome};

use super::backend::HealthStore;
use super::error::{StoreError, StoreResult};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS health_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    target TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    status_code INTEGER,
    latency_ms INTEGER,
    outcome TEXT NOT NULL
)
"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_health_records_target ON health_records (target, id)";

/// Record store backed by a local SQLite file.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
    db_path: String,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and set up the schema.
    #[instrument(skip_all)]
    pub async fn new(db_path: impl AsRef<Path>) -> StoreResult<Self> {
        let db_path_str = db_path.as_ref().to_string_lossy().to_string();

        info!("initializing SQLite store at: {}", db_path_str);

        let options = SqliteConnectOptions::new()
            .filename(&db_path_str)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        debug!("creating schema");
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        sqlx::query(CREATE_INDEX).execute(&pool).await?;

        Ok(Self {
            pool,
            db_path: db_path_str,
        })
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> StoreResult<HealthRecord> {
        let outcome: String = row.try_get("outcome")?;
        let outcome = Outcome::from_str(&outcome).map_err(StoreError::CorruptRecord)?;

        Ok(HealthRecord {
            target: row.try_get("target")?,
            timestamp: row.try_get("timestamp")?,
            status_code: row
                .try_get::<Option<i64>, _>("status_code")?
                .map(|code| code as u16),
            latency_ms: row
                .try_get::<Option<i64>, _>("latency_ms")?
                .map(|ms| ms as u64),
            outcome,
        })
    }
}

#[async_trait]
impl HealthStore for SqliteStore {
    async fn append(&self, record: HealthRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO health_records (target, timestamp, status_code, latency_ms, outcome)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.target)
        .bind(record.timestamp)
        .bind(record.status_code.map(|code| code as i64))
        .bind(record.latency_ms.map(|ms| ms as i64))
        .bind(record.outcome.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    async fn query(&self, target: &str) -> StoreResult<Vec<HealthRecord>> {
        let rows = sqlx::query(
            "SELECT target, timestamp, status_code, latency_ms, outcome
             FROM health_records WHERE target = ? ORDER BY id ASC",
        )
        .bind(target)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn close(&self) -> StoreResult<()> {
        debug!("closing SQLite store at {}", self.db_path);
        self.pool.close().await;
        Ok(())
    }
}
