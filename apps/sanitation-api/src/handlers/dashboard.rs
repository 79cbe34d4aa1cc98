//! 运营看板
//!
//! - GET /api/dashboard?companyId=&locationId=

use crate::AppState;
use crate::utils::response::{analytics_error, ok};
use crate::utils::scope_of;
use api_contract::DashboardQuery;
use axum::{
    extract::{Query, State},
    response::Response,
};

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let scope = scope_of(query.company_id, query.location_id);
    match state.analytics.dashboard(&scope, state.now()).await {
        Ok(dashboard) => ok(dashboard),
        Err(err) => analytics_error(err),
    }
}
