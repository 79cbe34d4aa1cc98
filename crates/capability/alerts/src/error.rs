use sanimon_storage::StorageError;
use sanimon_telemetry::record_storage_failure;
use tracing::warn;

/// 告警链路错误。
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for AlertError {
    fn from(err: StorageError) -> Self {
        record_storage_failure();
        warn!(target: "sanimon.alerts", error = %err, "alert_storage_failed");
        AlertError::Storage(err.to_string())
    }
}
