//! 合并阶段：汇总计数、按严重级别过滤、排序。

use crate::model::{Alert, AlertFeed, AlertSummary};
use domain::Severity;
use std::cmp::Reverse;

/// 统计全部告警（过滤前）的级别分布。
pub fn summarize(alerts: &[Alert]) -> AlertSummary {
    let mut summary = AlertSummary {
        total: alerts.len() as u64,
        ..AlertSummary::default()
    };
    for alert in alerts {
        match alert.severity {
            Severity::Critical => summary.critical += 1,
            Severity::High => summary.high += 1,
            Severity::Medium => summary.medium += 1,
            Severity::Low => summary.low += 1,
        }
    }
    summary
}

/// 严重级别降序，同级按 created_at 降序；稳定排序，完全相同时保持规则顺序。
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by_key(|alert| (Reverse(alert.severity.rank()), Reverse(alert.created_at)));
}

/// 汇总 → 过滤 → 排序。
pub fn merge(alerts: Vec<Alert>, severity: Option<Severity>) -> AlertFeed {
    let summary = summarize(&alerts);
    let mut alerts: Vec<Alert> = match severity {
        Some(severity) => alerts
            .into_iter()
            .filter(|alert| alert.severity == severity)
            .collect(),
        None => alerts,
    };
    sort_alerts(&mut alerts);
    AlertFeed { alerts, summary }
}
