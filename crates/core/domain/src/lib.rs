pub mod kinds;
pub mod window;

pub use kinds::{AlertType, ChecklistItem, IssueType, ParseKindError, Severity, StaffRole, ToiletStatus};
pub use window::{DayBucket, Period, TimeRange, Window, enumerate_days, lookback, resolve_window};

/// 查询作用域：所有模块共享的公司/位置过滤条件。
///
/// 两个条件可以同时给出，此时两个谓词都会生效（不做冲突校验）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    pub company_id: Option<String>,
    pub location_id: Option<String>,
}

impl ScopeFilter {
    /// 构造作用域，空白字符串视为未提供。
    pub fn new(company_id: Option<String>, location_id: Option<String>) -> Self {
        Self {
            company_id: non_blank(company_id),
            location_id: non_blank(location_id),
        }
    }

    /// 不限定范围（全部公司、全部位置）。
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_company(company_id: impl Into<String>) -> Self {
        Self::new(Some(company_id.into()), None)
    }

    pub fn for_location(location_id: impl Into<String>) -> Self {
        Self::new(None, Some(location_id.into()))
    }

    pub fn is_unscoped(&self) -> bool {
        self.company_id.is_none() && self.location_id.is_none()
    }

    /// 判断某个位置（及其所属公司）是否落在作用域内。
    pub fn matches(&self, location_id: &str, company_id: &str) -> bool {
        if let Some(scope) = self.location_id.as_deref() {
            if scope != location_id {
                return false;
            }
        }
        if let Some(scope) = self.company_id.as_deref() {
            if scope != company_id {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
