//! 统计报表
//!
//! - GET /api/analytics?type=overview|ratings|cleaning|issues&period=7d|30d|90d

use crate::AppState;
use crate::utils::response::{analytics_error, ok};
use crate::utils::scope_of;
use api_contract::AnalyticsQuery;
use axum::{
    extract::{Query, State},
    response::Response,
};
use sanimon_analytics::ReportKind;

pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let kind = match ReportKind::parse(query.report_type.as_deref()) {
        Ok(kind) => kind,
        Err(err) => return analytics_error(err),
    };
    let scope = scope_of(query.company_id, query.location_id);
    match state
        .analytics
        .report(kind, &scope, query.period.as_deref(), state.now())
        .await
    {
        Ok(report) => ok(report),
        Err(err) => analytics_error(err),
    }
}
