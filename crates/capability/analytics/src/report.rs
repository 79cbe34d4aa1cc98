//! 报表输出模型（camelCase JSON）。

use crate::error::AnalyticsError;
use chrono::{DateTime, Utc};
use domain::{IssueType, StaffRole};
use serde::Serialize;

/// 报表类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Overview,
    Ratings,
    Cleaning,
    Issues,
}

impl ReportKind {
    /// 缺省为 overview；未知类型返回校验错误。
    pub fn parse(value: Option<&str>) -> Result<Self, AnalyticsError> {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            None | Some("overview") => Ok(ReportKind::Overview),
            Some("ratings") => Ok(ReportKind::Ratings),
            Some("cleaning") => Ok(ReportKind::Cleaning),
            Some("issues") => Ok(ReportKind::Issues),
            Some(other) => Err(AnalyticsError::Validation(format!(
                "invalid analytics type: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Overview => "overview",
            ReportKind::Ratings => "ratings",
            ReportKind::Cleaning => "cleaning",
            ReportKind::Issues => "issues",
        }
    }
}

/// 报表结果，序列化为 `{ "<type>": {...} }`。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsReport {
    Overview(OverviewReport),
    Ratings(RatingsReport),
    Cleaning(CleaningReport),
    Issues(IssuesReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueShare {
    pub issue: IssueType,
    pub count: u64,
}

/// 日趋势点；没有数据的日子也会出现，averageRating 为 0。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub feedback: u64,
    pub average_rating: f64,
    pub cleanings: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub total_feedback: u64,
    pub average_rating: f64,
    pub total_cleanings: u64,
    pub low_rating_count: u64,
    pub issue_distribution: Vec<IssueShare>,
    pub daily_trends: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingTrend {
    pub date: String,
    pub ratings: Vec<RatingBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingsReport {
    pub distribution: Vec<RatingBucket>,
    pub trends: Vec<RatingTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    pub staff_id: String,
    pub staff_name: String,
    pub cleanings: u64,
    /// 一位小数
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningReport {
    pub staff_performance: Vec<StaffPerformance>,
    pub total_cleanings: u64,
    /// 一位小数
    pub average_cleanings_per_staff: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTypeCount {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTrend {
    pub date: String,
    pub issues: Vec<IssueTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicToilet {
    pub toilet_id: String,
    pub toilet_number: String,
    pub location: String,
    pub issue_count: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesReport {
    pub trends: Vec<IssueTrend>,
    pub problematic_toilets: Vec<ProblematicToilet>,
}

/// 看板统计。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_toilets: u64,
    pub average_rating: f64,
    pub total_feedback: u64,
    pub todays_feedback: u64,
    pub overdue_cleanings: u64,
    pub low_rating_alerts: u64,
    pub todays_cleaning: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentToilet {
    pub id: String,
    pub toilet_number: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFeedback {
    pub id: String,
    pub rating: u8,
    pub issue_type: Option<IssueType>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub toilet: RecentToilet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffToday {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub today_cleanings: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_feedback: Vec<RecentFeedback>,
    pub staff_performance: Vec<StaffToday>,
    pub issue_distribution: Vec<IssueShare>,
    pub last_updated: DateTime<Utc>,
}

/// 保留一位小数。
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
