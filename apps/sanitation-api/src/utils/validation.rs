//! 输入规范化辅助函数
//!
//! - scope_of：查询参数中的 companyId/locationId → ScopeFilter（空白视为未提供）
//! - normalize_action：POST /api/alerts 的 action 字段
//! - client_meta：从请求头提取 user-agent 与客户端 IP

use axum::http::{HeaderMap, header};
use domain::ScopeFilter;

/// 构造查询作用域
pub fn scope_of(company_id: Option<String>, location_id: Option<String>) -> ScopeFilter {
    ScopeFilter::new(company_id, location_id)
}

/// 去除首尾空格并转小写；空串视为未提供
pub fn normalize_action(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
}

/// 提取 user-agent 与客户端 IP（x-forwarded-for 的第一个地址，其次 x-real-ip）
pub fn client_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
        })
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    (user_agent, ip_address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_meta_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("kiosk/1.0"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.7, 172.16.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("192.168.1.9"));
        let (user_agent, ip) = client_meta(&headers);
        assert_eq!(user_agent.as_deref(), Some("kiosk/1.0"));
        assert_eq!(ip.as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn blank_scope_values_are_ignored() {
        let scope = scope_of(Some(" ".to_string()), Some("location-main".to_string()));
        assert_eq!(scope.company_id, None);
        assert_eq!(scope.location_id.as_deref(), Some("location-main"));
        assert_eq!(normalize_action(Some(" Create ")).as_deref(), Some("create"));
        assert_eq!(normalize_action(Some("")), None);
    }
}
