//! 告警 handlers
//!
//! - GET /api/alerts：按作用域计算当前告警，可按 severity 过滤
//! - POST /api/alerts：`action = create` 创建人工告警，`action = acknowledge` 确认告警
//!
//! 告警不落库，每次 GET 都从存储重新计算。

use crate::AppState;
use crate::utils::response::{alert_error, bad_request_error, json_rejection, ok};
use crate::utils::{normalize_action, scope_of};
use api_contract::{AlertActionRequest, AlertsQuery};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::Response,
};
use sanimon_alerts::{ManualAlertInput, parse_severity};

/// 列出告警
///
/// # 错误处理
///
/// - `400 BAD REQUEST`: severity 不是 critical/high/medium/low
/// - `500 INTERNAL SERVER ERROR`: 存储层错误（任何一条规则失败都不返回部分结果）
pub async fn list_alerts(State(state): State<AppState>, Query(query): Query<AlertsQuery>) -> Response {
    let severity = match parse_severity(query.severity.as_deref()) {
        Ok(severity) => severity,
        Err(err) => return alert_error(err),
    };
    let scope = scope_of(query.company_id, query.location_id);
    match state.alerts.get_alerts(&scope, severity, state.now()).await {
        Ok(feed) => ok(feed),
        Err(err) => alert_error(err),
    }
}

/// 创建或确认告警
///
/// # 错误处理
///
/// - `400 BAD REQUEST`: action 无效，或创建时缺少 type/toiletId/message
/// - `404 NOT FOUND`: 创建时厕位不存在
pub async fn alert_action(
    State(state): State<AppState>,
    payload: Result<Json<AlertActionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(rejection),
    };
    match normalize_action(req.action.as_deref()).as_deref() {
        Some("acknowledge") => ok(state.alerts.acknowledge(req.alert_id.as_deref())),
        Some("create") => {
            let input = ManualAlertInput {
                alert_type: req.alert_type,
                toilet_id: req.toilet_id,
                message: req.message,
                severity: req.severity,
            };
            match state.alerts.create_manual_alert(input, state.now()).await {
                Ok(alert) => ok(alert),
                Err(err) => alert_error(err),
            }
        }
        _ => bad_request_error("invalid action"),
    }
}
