//! 保洁记录 handlers
//!
//! - POST /api/cleaning-logs：记录保洁，同时推进厕位的下次保洁时间
//! - GET /api/cleaning-logs：分页列表，可按 toiletId/staffId 过滤

use crate::AppState;
use crate::utils::response::{
    cleaning_log_entry_to_dto, cleaning_outcome_to_dto, intake_error, json_rejection, ok,
    pagination_to_dto,
};
use crate::utils::scope_of;
use api_contract::{
    ChecklistField, CleaningLogListDto, CleaningLogListQuery, LogCleaningRequest,
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::Response,
};
use sanimon_intake::{ChecklistInput, CleaningLogQuery, NewCleaningLog};

/// 记录保洁
///
/// checklist 可以是字符串数组，也可以是 JSON 编码后的数组字符串。
///
/// # 错误处理
///
/// - `400 BAD REQUEST`: 请求体不是合法 JSON，缺少 toiletId/staffId，清单无法解析或清单项未知
/// - `404 NOT FOUND`: 厕位或员工不存在
pub async fn log_cleaning(
    State(state): State<AppState>,
    payload: Result<Json<LogCleaningRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(rejection),
    };
    let request = NewCleaningLog {
        toilet_id: req.toilet_id.unwrap_or_default(),
        staff_id: req.staff_id.unwrap_or_default(),
        checklist: match req.checklist {
            Some(ChecklistField::Items(tags)) => ChecklistInput::Tags(tags),
            Some(ChecklistField::Encoded(text)) => ChecklistInput::Encoded(text),
            None => ChecklistInput::default(),
        },
        notes: req.notes,
        photo_url: req.photo_url,
    };
    match state.intake.log_cleaning(request, state.now()).await {
        Ok(outcome) => ok(cleaning_outcome_to_dto(outcome)),
        Err(err) => intake_error(err),
    }
}

pub async fn list_cleaning_logs(
    State(state): State<AppState>,
    Query(query): Query<CleaningLogListQuery>,
) -> Response {
    let scope = scope_of(query.company_id, query.location_id);
    let request = CleaningLogQuery {
        toilet_id: query.toilet_id,
        staff_id: query.staff_id,
        limit: query.limit,
        offset: query.offset,
    };
    match state.intake.list_cleaning_logs(&scope, request).await {
        Ok(page) => {
            let pagination = pagination_to_dto(&page);
            ok(CleaningLogListDto {
                cleaning_logs: page
                    .items
                    .into_iter()
                    .map(cleaning_log_entry_to_dto)
                    .collect(),
                pagination,
            })
        }
        Err(err) => intake_error(err),
    }
}
