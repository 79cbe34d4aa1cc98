//! Telemetry 指标快照。
//!
//! - GET /metrics

use crate::utils::response::ok;
use api_contract::MetricsSnapshotDto;
use axum::response::Response;
use sanimon_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        alert_evaluations: snapshot.alert_evaluations,
        alerts_emitted: snapshot.alerts_emitted,
        alert_toilets_missing: snapshot.alert_toilets_missing,
        analytics_reports: snapshot.analytics_reports,
        report_latency_ms_total: snapshot.report_latency_ms_total,
        report_latency_ms_count: snapshot.report_latency_ms_count,
        feedback_submitted: snapshot.feedback_submitted,
        low_rating_feedback: snapshot.low_rating_feedback,
        cleaning_logs_recorded: snapshot.cleaning_logs_recorded,
        storage_failures: snapshot.storage_failures,
    })
}
