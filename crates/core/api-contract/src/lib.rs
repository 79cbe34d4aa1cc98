//! 稳定的 DTO 与 API 响应契约。
//!
//! 请求体与查询参数一律 camelCase；枚举类字段保持字符串，由能力层解析，
//! 这样非法取值会得到统一的 400 响应而不是反序列化失败。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// GET /api/alerts 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsQuery {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
    pub severity: Option<String>,
}

/// POST /api/alerts 请求体。
///
/// - `action = "create"`：需要 type、toiletId、message，severity 可选
/// - `action = "acknowledge"`：需要 alertId
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertActionRequest {
    pub action: Option<String>,
    pub alert_id: Option<String>,
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    pub toilet_id: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
}

/// GET /api/analytics 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub period: Option<String>,
}

/// GET /api/dashboard 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
}

/// GET /api/feedback 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListQuery {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
    pub toilet_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/cleaning-logs 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLogListQuery {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
    pub toilet_id: Option<String>,
    pub staff_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 反馈提交请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub toilet_id: Option<String>,
    pub rating: Option<i64>,
    pub issue_type: Option<String>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
}

/// 保洁记录请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCleaningRequest {
    pub toilet_id: Option<String>,
    pub staff_id: Option<String>,
    #[serde(default)]
    pub checklist: Option<ChecklistField>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// 保洁清单：字符串数组，或 JSON 编码后的数组字符串（扫码页的提交形态）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChecklistField {
    Items(Vec<String>),
    Encoded(String),
}

/// 分页信息。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// 列表中的厕位摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToiletSummaryDto {
    pub id: String,
    pub toilet_number: String,
    /// `{位置名} - {楼层名}`
    pub location: String,
    pub location_id: String,
}

/// 提交成功后返回的反馈摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmittedDto {
    pub id: String,
    pub rating: u8,
    pub issue_type: Option<String>,
    pub created_at: String,
}

/// 反馈列表项。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    pub id: String,
    pub toilet_id: String,
    pub rating: u8,
    pub issue_type: Option<String>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub toilet: ToiletSummaryDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListDto {
    pub feedback: Vec<FeedbackDto>,
    pub pagination: PaginationDto,
}

/// 保洁记录。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLogDto {
    pub id: String,
    pub toilet_id: String,
    pub staff_id: String,
    pub checklist: Vec<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub cleaned_at: String,
}

/// 写入保洁记录的结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLoggedDto {
    pub cleaning_log: CleaningLogDto,
    pub next_cleaning_due: Option<String>,
}

/// 保洁记录列表项。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLogEntryDto {
    #[serde(flatten)]
    pub log: CleaningLogDto,
    pub staff_name: Option<String>,
    pub toilet: ToiletSummaryDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLogListDto {
    pub cleaning_logs: Vec<CleaningLogEntryDto>,
    pub pagination: PaginationDto,
}

/// 进程内指标快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
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
