use sanimon_telemetry::{
    metrics, new_request_ids, record_alerts_emitted, record_report_latency_ms,
    record_storage_failure,
};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_alerts_emitted(3);
    record_storage_failure();
    record_report_latency_ms(12);
    let after = metrics().snapshot();
    assert!(after.alerts_emitted >= before.alerts_emitted + 3);
    assert!(after.storage_failures > before.storage_failures);
    assert!(after.report_latency_ms_total >= before.report_latency_ms_total + 12);
    assert!(after.report_latency_ms_count > before.report_latency_ms_count);
}
