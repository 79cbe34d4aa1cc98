use sanimon_storage::StorageError;
use sanimon_telemetry::record_storage_failure;
use tracing::warn;

/// 写入链路错误。
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for IntakeError {
    fn from(err: StorageError) -> Self {
        record_storage_failure();
        warn!(target: "sanimon.intake", error = %err, "intake_storage_failed");
        IntakeError::Storage(err.to_string())
    }
}
