//! 追踪、请求 ID 与进程内计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub alert_evaluations: u64,
    pub alerts_emitted: u64,
    pub alert_toilets_missing: u64,
    pub analytics_reports: u64,
    pub report_latency_ms_total: u64,
    pub report_latency_ms_count: u64,
    pub feedback_submitted: u64,
    pub low_rating_feedback: u64,
    pub cleaning_logs_recorded: u64,
    pub storage_failures: u64,
}

/// 进程内计数指标。
pub struct TelemetryMetrics {
    alert_evaluations: AtomicU64,
    alerts_emitted: AtomicU64,
    alert_toilets_missing: AtomicU64,
    analytics_reports: AtomicU64,
    report_latency_ms_total: AtomicU64,
    report_latency_ms_count: AtomicU64,
    feedback_submitted: AtomicU64,
    low_rating_feedback: AtomicU64,
    cleaning_logs_recorded: AtomicU64,
    storage_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            alert_evaluations: AtomicU64::new(0),
            alerts_emitted: AtomicU64::new(0),
            alert_toilets_missing: AtomicU64::new(0),
            analytics_reports: AtomicU64::new(0),
            report_latency_ms_total: AtomicU64::new(0),
            report_latency_ms_count: AtomicU64::new(0),
            feedback_submitted: AtomicU64::new(0),
            low_rating_feedback: AtomicU64::new(0),
            cleaning_logs_recorded: AtomicU64::new(0),
            storage_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            alert_evaluations: self.alert_evaluations.load(Ordering::Relaxed),
            alerts_emitted: self.alerts_emitted.load(Ordering::Relaxed),
            alert_toilets_missing: self.alert_toilets_missing.load(Ordering::Relaxed),
            analytics_reports: self.analytics_reports.load(Ordering::Relaxed),
            report_latency_ms_total: self.report_latency_ms_total.load(Ordering::Relaxed),
            report_latency_ms_count: self.report_latency_ms_count.load(Ordering::Relaxed),
            feedback_submitted: self.feedback_submitted.load(Ordering::Relaxed),
            low_rating_feedback: self.low_rating_feedback.load(Ordering::Relaxed),
            cleaning_logs_recorded: self.cleaning_logs_recorded.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可由 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录告警计算次数。
pub fn record_alert_evaluation() {
    metrics().alert_evaluations.fetch_add(1, Ordering::Relaxed);
}

/// 记录产出的告警数量（过滤前）。
pub fn record_alerts_emitted(count: u64) {
    metrics().alerts_emitted.fetch_add(count, Ordering::Relaxed);
}

/// 记录多次投诉规则回查厕位失败（厕位已删除）的次数。
pub fn record_alert_toilet_missing() {
    metrics()
        .alert_toilets_missing
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录统计报表次数。
pub fn record_analytics_report() {
    metrics().analytics_reports.fetch_add(1, Ordering::Relaxed);
}

/// 记录报表耗时（毫秒）。
pub fn record_report_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .report_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .report_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录反馈提交次数。
pub fn record_feedback_submitted() {
    metrics().feedback_submitted.fetch_add(1, Ordering::Relaxed);
}

/// 记录低分反馈次数。
pub fn record_low_rating_feedback() {
    metrics().low_rating_feedback.fetch_add(1, Ordering::Relaxed);
}

/// 记录保洁记录写入次数。
pub fn record_cleaning_logged() {
    metrics()
        .cleaning_logs_recorded
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录存储失败次数。
pub fn record_storage_failure() {
    metrics().storage_failures.fetch_add(1, Ordering::Relaxed);
}
