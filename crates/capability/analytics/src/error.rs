use sanimon_storage::StorageError;
use sanimon_telemetry::record_storage_failure;
use tracing::warn;

/// 统计链路错误。
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for AnalyticsError {
    fn from(err: StorageError) -> Self {
        record_storage_failure();
        warn!(target: "sanimon.analytics", error = %err, "analytics_storage_failed");
        AnalyticsError::Storage(err.to_string())
    }
}
