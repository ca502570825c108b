//! Error types for store operations

use std::fmt;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while appending or querying health records
#[derive(Debug)]
pub enum StoreError {
    /// Database connection failed
    ConnectionFailed(String),

    /// Appending a record failed
    WriteFailed(String),

    /// Querying a series failed
    QueryFailed(String),

    /// Stored data could not be decoded into a record
    CorruptRecord(String),

    /// I/O error (file access, etc.)
    IoError(std::io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConnectionFailed(msg) => {
                write!(f, "failed to connect to record store: {}", msg)
            }
            StoreError::WriteFailed(msg) => write!(f, "record append failed: {}", msg),
            StoreError::QueryFailed(msg) => write!(f, "record query failed: {}", msg),
            StoreError::CorruptRecord(msg) => write!(f, "corrupt health record: {}", msg),
            StoreError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(io_err) => StoreError::IoError(io_err),
            sqlx::Error::ColumnDecode { .. } => StoreError::CorruptRecord(err.to_string()),
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}
