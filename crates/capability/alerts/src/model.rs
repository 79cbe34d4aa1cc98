//! 告警输出模型（序列化为 camelCase JSON）。

use chrono::{DateTime, Utc};
use domain::{AlertType, IssueType, Severity};
use serde::Serialize;

/// 一条告警。规则告警的 id 由规则名 + 来源记录 id 决定，重复计算结果一致。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub toilet_id: String,
    /// `{位置名} - {楼层名}`
    #[serde(rename = "location")]
    pub location_label: String,
    pub toilet_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AlertData>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_manual: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// 规则载荷。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertData {
    LowRating {
        rating: u8,
        comment: Option<String>,
        #[serde(rename = "issueType")]
        issue_type: Option<IssueType>,
    },
    MissedCleaning {
        #[serde(rename = "hoursOverdue")]
        hours_overdue: i64,
        #[serde(rename = "lastCleanedAt")]
        last_cleaned_at: Option<DateTime<Utc>>,
        #[serde(rename = "cleaningFrequency")]
        cleaning_frequency: i32,
    },
    MultipleComplaints {
        #[serde(rename = "complaintCount")]
        complaint_count: u64,
    },
    NoCleaningLog {
        #[serde(rename = "hoursSinceCleaning")]
        hours_since_cleaning: i64,
        #[serde(rename = "lastCleanedAt")]
        last_cleaned_at: Option<DateTime<Utc>>,
    },
    EmergencyIssue {
        #[serde(rename = "issueType")]
        issue_type: Option<IssueType>,
        comment: Option<String>,
    },
}

/// 按严重级别的计数。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// GetAlerts 的结果：`alerts` 为过滤后的视图，`summary` 统计过滤前的全部告警。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertFeed {
    pub alerts: Vec<Alert>,
    pub summary: AlertSummary,
}

/// 人工告警输入（未校验的原始字段）。
#[derive(Debug, Clone, Default)]
pub struct ManualAlertInput {
    pub alert_type: Option<String>,
    pub toilet_id: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
}

/// 确认告警的回执。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub alert_id: Option<String>,
    pub acknowledged: bool,
    pub message: String,
}
