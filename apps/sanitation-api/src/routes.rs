//! 路由定义
//!
//! 集中管理所有路由，将路径映射到对应的 handlers：
//! - 健康检查：/health
//! - 指标快照：/metrics
//! - 告警：/api/alerts
//! - 统计：/api/analytics
//! - 看板：/api/dashboard
//! - 反馈：/api/feedback
//! - 保洁记录：/api/cleaning-logs

use crate::AppState;
use crate::handlers::*;
use crate::middleware::request_context;
use axum::{
    Router, middleware,
    routing::get,
};

/// 创建 /api 下的业务路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts).post(alert_action))
        .route("/analytics", get(get_analytics))
        .route("/dashboard", get(get_dashboard))
        .route("/feedback", get(list_feedback).post(submit_feedback))
        .route(
            "/cleaning-logs",
            get(list_cleaning_logs).post(log_cleaning),
        )
}

/// 创建完整应用：业务路由 + 健康检查 + 指标 + 请求上下文中间件
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(middleware::from_fn(request_context))
}
