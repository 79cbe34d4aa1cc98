//! 用户反馈 handlers
//!
//! - POST /api/feedback：扫码提交反馈（记录 user-agent 与客户端 IP）
//! - GET /api/feedback：分页列表，最新的在前

use crate::AppState;
use crate::utils::response::{
    feedback_submitted_to_dto, feedback_to_dto, intake_error, json_rejection, ok,
    pagination_to_dto,
};
use crate::utils::{client_meta, scope_of};
use api_contract::{CreateFeedbackRequest, FeedbackListDto, FeedbackListQuery};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use sanimon_intake::{FeedbackQuery, NewFeedback};

/// 提交反馈
///
/// # 错误处理
///
/// - `400 BAD REQUEST`: 请求体不是合法 JSON，缺少 toiletId/rating，评分不在 1..=5，或问题类型未知
/// - `404 NOT FOUND`: 厕位不存在
pub async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(rejection),
    };
    let (user_agent, ip_address) = client_meta(&headers);
    let request = NewFeedback {
        toilet_id: req.toilet_id.unwrap_or_default(),
        rating: req.rating,
        issue_type: req.issue_type,
        comment: req.comment,
        photo_url: req.photo_url,
        user_agent,
        ip_address,
    };
    match state.intake.submit_feedback(request, state.now()).await {
        Ok(record) => ok(feedback_submitted_to_dto(record)),
        Err(err) => intake_error(err),
    }
}

pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackListQuery>,
) -> Response {
    let scope = scope_of(query.company_id, query.location_id);
    let request = FeedbackQuery {
        toilet_id: query.toilet_id,
        limit: query.limit,
        offset: query.offset,
    };
    match state.intake.list_feedback(&scope, request).await {
        Ok(page) => {
            let pagination = pagination_to_dto(&page);
            ok(FeedbackListDto {
                feedback: page.items.into_iter().map(feedback_to_dto).collect(),
                pagination,
            })
        }
        Err(err) => intake_error(err),
    }
}
