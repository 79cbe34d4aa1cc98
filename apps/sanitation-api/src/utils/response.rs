//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：bad_request_error, not_found_error, storage_error
//! - 能力层错误映射：alert_error, analytics_error, intake_error
//! - DTO 转换：feedback_to_dto, cleaning_log_to_dto, pagination_to_dto 等
//!
//! 错误码约定：
//! - 400 `INVALID.REQUEST`
//! - 404 `RESOURCE.NOT_FOUND`
//! - 500 `INTERNAL.ERROR`

use api_contract::{
    ApiResponse, CleaningLogDto, CleaningLogEntryDto, CleaningLoggedDto, FeedbackDto,
    FeedbackSubmittedDto, PaginationDto, ToiletSummaryDto,
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use sanimon_alerts::AlertError;
use sanimon_analytics::AnalyticsError;
use sanimon_intake::{IntakeError, Paged};
use sanimon_storage::{
    CleaningLogDetail, CleaningLogRecord, CleaningOutcome, FeedbackDetail, FeedbackRecord,
    ToiletPath,
};
use serde::Serialize;

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 错误请求响应
/// 请求体无法解析（非 JSON、字段类型不符）同样走 400 信封。
pub fn json_rejection(rejection: JsonRejection) -> Response {
    bad_request_error(rejection.body_text())
}

pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error(resource: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(
            "RESOURCE.NOT_FOUND",
            format!("{resource} not found"),
        )),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message.into())),
    )
        .into_response()
}

pub fn alert_error(err: AlertError) -> Response {
    match err {
        AlertError::Validation(message) => bad_request_error(message),
        AlertError::NotFound(resource) => not_found_error(resource),
        AlertError::Storage(message) => storage_error(message),
    }
}

pub fn analytics_error(err: AnalyticsError) -> Response {
    match err {
        AnalyticsError::Validation(message) => bad_request_error(message),
        AnalyticsError::Storage(message) => storage_error(message),
    }
}

pub fn intake_error(err: IntakeError) -> Response {
    match err {
        IntakeError::Validation(message) => bad_request_error(message),
        IntakeError::NotFound(resource) => not_found_error(resource),
        IntakeError::Storage(message) => storage_error(message),
    }
}

/// UTC 时间统一输出为 RFC3339（毫秒，Z 结尾）
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn toilet_summary(toilet_id: &str, toilet_number: String, path: &ToiletPath) -> ToiletSummaryDto {
    ToiletSummaryDto {
        id: toilet_id.to_string(),
        toilet_number,
        location: path.label(),
        location_id: path.location_id.clone(),
    }
}

/// FeedbackRecord 转 FeedbackSubmittedDto
pub fn feedback_submitted_to_dto(record: FeedbackRecord) -> FeedbackSubmittedDto {
    FeedbackSubmittedDto {
        id: record.feedback_id,
        rating: record.rating,
        issue_type: record.issue_type.map(|issue| issue.to_string()),
        created_at: timestamp(record.created_at),
    }
}

/// FeedbackDetail 转 FeedbackDto
pub fn feedback_to_dto(detail: FeedbackDetail) -> FeedbackDto {
    let toilet = toilet_summary(&detail.feedback.toilet_id, detail.toilet_number, &detail.path);
    let record = detail.feedback;
    FeedbackDto {
        id: record.feedback_id,
        toilet_id: record.toilet_id,
        rating: record.rating,
        issue_type: record.issue_type.map(|issue| issue.to_string()),
        comment: record.comment,
        photo_url: record.photo_url,
        created_at: timestamp(record.created_at),
        toilet,
    }
}

/// CleaningLogRecord 转 CleaningLogDto
pub fn cleaning_log_to_dto(record: CleaningLogRecord) -> CleaningLogDto {
    CleaningLogDto {
        id: record.log_id,
        toilet_id: record.toilet_id,
        staff_id: record.staff_id,
        checklist: record
            .checklist
            .iter()
            .map(|item| item.to_string())
            .collect(),
        notes: record.notes,
        photo_url: record.photo_url,
        cleaned_at: timestamp(record.cleaned_at),
    }
}

/// CleaningOutcome 转 CleaningLoggedDto
pub fn cleaning_outcome_to_dto(outcome: CleaningOutcome) -> CleaningLoggedDto {
    CleaningLoggedDto {
        next_cleaning_due: outcome.toilet.next_cleaning_due.map(timestamp),
        cleaning_log: cleaning_log_to_dto(outcome.log),
    }
}

/// CleaningLogDetail 转 CleaningLogEntryDto
pub fn cleaning_log_entry_to_dto(detail: CleaningLogDetail) -> CleaningLogEntryDto {
    let toilet = toilet_summary(&detail.log.toilet_id, detail.toilet_number, &detail.path);
    CleaningLogEntryDto {
        log: cleaning_log_to_dto(detail.log),
        staff_name: detail.staff_name,
        toilet,
    }
}

/// 分页信息
pub fn pagination_to_dto<T>(page: &Paged<T>) -> PaginationDto {
    PaginationDto {
        total: page.total,
        limit: page.limit,
        offset: page.offset,
        has_more: page.has_more(),
    }
}
