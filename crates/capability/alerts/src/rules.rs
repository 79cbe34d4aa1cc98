//! 五条检测规则。
//!
//! 每条规则只依赖 (作用域, now) 和存储内容，彼此之间没有共享状态，
//! 可以并发执行。

use crate::error::AlertError;
use crate::model::{Alert, AlertData};
use chrono::{DateTime, Duration, Utc};
use domain::{AlertType, IssueType, ScopeFilter, Severity, lookback};
use sanimon_storage::{
    FeedbackDetail, FeedbackFilter, FeedbackStore, ToiletDetail, ToiletFilter, ToiletStore,
};
use sanimon_telemetry::record_alert_toilet_missing;
use tracing::debug;

/// 低分阈值（含）。
pub const LOW_RATING_MAX: u8 = 2;
/// 同一厕位 24 小时内低分反馈超过该数量即视为多次投诉。
pub const COMPLAINT_THRESHOLD: u64 = 2;
/// 从未保洁的厕位使用的小时数。
pub const NEVER_CLEANED_HOURS: i64 = 999;
/// 超时多少小时后漏扫告警升级为 high。
pub const OVERDUE_ESCALATION_HOURS: i64 = 4;

fn last_day(now: DateTime<Utc>) -> FeedbackFilter {
    FeedbackFilter {
        max_rating: Some(LOW_RATING_MAX),
        ..FeedbackFilter::within(lookback(now, Duration::hours(24)))
    }
}

/// 规则产出的告警内容，附着到反馈或厕位上成为完整告警。
struct Draft {
    id: String,
    alert_type: AlertType,
    severity: Severity,
    title: &'static str,
    message: String,
    data: AlertData,
}

impl Draft {
    fn on_feedback(self, item: &FeedbackDetail) -> Alert {
        Alert {
            id: self.id,
            alert_type: self.alert_type,
            severity: self.severity,
            title: self.title.to_string(),
            message: self.message,
            toilet_id: item.feedback.toilet_id.clone(),
            location_label: item.path.label(),
            toilet_number: item.toilet_number.clone(),
            created_at: item.feedback.created_at,
            data: Some(self.data),
            is_manual: false,
        }
    }

    fn on_toilet(self, detail: &ToiletDetail, created_at: DateTime<Utc>) -> Alert {
        Alert {
            id: self.id,
            alert_type: self.alert_type,
            severity: self.severity,
            title: self.title.to_string(),
            message: self.message,
            toilet_id: detail.toilet.toilet_id.clone(),
            location_label: detail.path.label(),
            toilet_number: detail.toilet.toilet_number.clone(),
            created_at,
            data: Some(self.data),
            is_manual: false,
        }
    }
}

/// 24 小时内评分 ≤ 2 的反馈，每条一个告警；1 分 critical，2 分 high。
pub async fn low_rating(
    feedback: &dyn FeedbackStore,
    scope: &ScopeFilter,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let rows = feedback.list_feedback(scope, &last_day(now), None).await?;
    let alerts = rows
        .iter()
        .map(|item| {
            let rating = item.feedback.rating;
            let severity = if rating <= 1 {
                Severity::Critical
            } else {
                Severity::High
            };
            Draft {
                id: format!("low-rating-{}", item.feedback.feedback_id),
                alert_type: AlertType::LowRating,
                severity,
                title: "Low Rating Alert",
                message: format!("Toilet {} received a {}-star rating", item.toilet_number, rating),
                data: AlertData::LowRating {
                    rating,
                    comment: item.feedback.comment.clone(),
                    issue_type: item.feedback.issue_type,
                },
            }
            .on_feedback(item)
        })
        .collect();
    Ok(alerts)
}

/// ACTIVE 且 next_cleaning_due 已过的厕位；超时超过 4 小时为 high。
pub async fn missed_cleaning(
    toilets: &dyn ToiletStore,
    scope: &ScopeFilter,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let filter = ToiletFilter {
        due_before: Some(now),
        ..ToiletFilter::active()
    };
    let rows = toilets.list_toilets(scope, &filter).await?;
    let alerts = rows
        .iter()
        .filter_map(|detail| {
            let toilet = &detail.toilet;
            let due = toilet.next_cleaning_due?;
            let hours_overdue = (now - due).num_hours();
            let severity = if hours_overdue > OVERDUE_ESCALATION_HOURS {
                Severity::High
            } else {
                Severity::Medium
            };
            let draft = Draft {
                id: format!("missed-cleaning-{}", toilet.toilet_id),
                alert_type: AlertType::MissedCleaning,
                severity,
                title: "Missed Cleaning Alert",
                message: format!(
                    "Toilet {} is {} hours overdue for cleaning",
                    toilet.toilet_number, hours_overdue
                ),
                data: AlertData::MissedCleaning {
                    hours_overdue,
                    last_cleaned_at: toilet.last_cleaned_at,
                    cleaning_frequency: toilet.cleaning_frequency_hours,
                },
            };
            Some(draft.on_toilet(detail, due))
        })
        .collect();
    Ok(alerts)
}

/// 24 小时内低分反馈超过 2 条的厕位，每个厕位一个 high 告警。
///
/// 分组后逐个回查厕位路径；回查不到（厕位已被删除）时丢弃该告警。
pub async fn multiple_complaints(
    feedback: &dyn FeedbackStore,
    toilets: &dyn ToiletStore,
    scope: &ScopeFilter,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let groups = feedback
        .count_by_toilet(scope, &last_day(now), COMPLAINT_THRESHOLD)
        .await?;
    let mut alerts = Vec::with_capacity(groups.len());
    for group in groups {
        let Some(detail) = toilets.find_toilet(&group.toilet_id).await? else {
            record_alert_toilet_missing();
            debug!(
                target: "sanimon.alerts",
                toilet_id = %group.toilet_id,
                complaint_count = group.count,
                "complaint_toilet_missing"
            );
            continue;
        };
        let draft = Draft {
            id: format!("multiple-complaints-{}", detail.toilet.toilet_id),
            alert_type: AlertType::MultipleComplaints,
            severity: Severity::High,
            title: "Multiple Complaints Alert",
            message: format!(
                "Toilet {} received {} complaints in 24 hours",
                detail.toilet.toilet_number, group.count
            ),
            data: AlertData::MultipleComplaints {
                complaint_count: group.count,
            },
        };
        alerts.push(draft.on_toilet(&detail, now));
    }
    Ok(alerts)
}

/// ACTIVE 且超过 24 小时未保洁（或从未保洁）的厕位；
/// 距上次保洁的小时数超过保洁频率两倍时告警，级别固定 medium。
pub async fn no_cleaning_log(
    toilets: &dyn ToiletStore,
    scope: &ScopeFilter,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let filter = ToiletFilter {
        not_cleaned_since: Some(now - Duration::hours(24)),
        ..ToiletFilter::active()
    };
    let rows = toilets.list_toilets(scope, &filter).await?;
    let alerts = rows
        .iter()
        .filter_map(|detail| {
            let toilet = &detail.toilet;
            let hours_since_cleaning = toilet
                .last_cleaned_at
                .map(|at| (now - at).num_hours())
                .unwrap_or(NEVER_CLEANED_HOURS);
            if hours_since_cleaning <= i64::from(toilet.cleaning_frequency_hours) * 2 {
                return None;
            }
            let draft = Draft {
                id: format!("no-cleaning-{}", toilet.toilet_id),
                alert_type: AlertType::NoCleaningLog,
                severity: Severity::Medium,
                title: "No Cleaning Record Alert",
                message: format!(
                    "Toilet {} hasn't been cleaned in {} hours",
                    toilet.toilet_number, hours_since_cleaning
                ),
                data: AlertData::NoCleaningLog {
                    hours_since_cleaning,
                    last_cleaned_at: toilet.last_cleaned_at,
                },
            };
            let created_at = toilet.last_cleaned_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            Some(draft.on_toilet(detail, created_at))
        })
        .collect();
    Ok(alerts)
}

/// 1 小时内报告断水或设施损坏的反馈，级别固定 critical。
pub async fn emergency_issue(
    feedback: &dyn FeedbackStore,
    scope: &ScopeFilter,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let filter = FeedbackFilter {
        issue_types: IssueType::EMERGENCY.to_vec(),
        ..FeedbackFilter::within(lookback(now, Duration::hours(1)))
    };
    let rows = feedback.list_feedback(scope, &filter, None).await?;
    let alerts = rows
        .iter()
        .map(|item| {
            let issue = item
                .feedback
                .issue_type
                .map(|issue| issue.label())
                .unwrap_or_default();
            Draft {
                id: format!("emergency-{}", item.feedback.feedback_id),
                alert_type: AlertType::EmergencyIssue,
                severity: Severity::Critical,
                title: "Emergency Issue Alert",
                message: format!("Toilet {} has {}", item.toilet_number, issue),
                data: AlertData::EmergencyIssue {
                    issue_type: item.feedback.issue_type,
                    comment: item.feedback.comment.clone(),
                },
            }
            .on_feedback(item)
        })
        .collect();
    Ok(alerts)
}
