//! 数据模型
//!
//! 定义所有存储相关的数据模型和查询条件：
//! - 设施层级：CompanyRecord, LocationRecord, FloorRecord, ToiletRecord
//! - 关联视图：ToiletPath, ToiletDetail, FeedbackDetail, CleaningLogDetail
//! - 写入模型：FeedbackRecord, CleaningLogRecord, CleaningOutcome
//! - 员工：StaffRecord
//! - 查询条件：ToiletFilter, FeedbackFilter, CleaningLogFilter, StaffFilter, Page
//! - 分组结果：RatingCount, IssueCount, ToiletCount

use chrono::{DateTime, Utc};
use domain::{ChecklistItem, IssueType, StaffRole, TimeRange, ToiletStatus};

/// 公司（设施运营方）。
#[derive(Debug, Clone)]
pub struct CompanyRecord {
    pub company_id: String,
    pub name: String,
}

/// 位置（楼宇），隶属于公司。
#[derive(Debug, Clone)]
pub struct LocationRecord {
    pub location_id: String,
    pub company_id: String,
    pub name: String,
    pub address: Option<String>,
}

/// 楼层，隶属于位置。
#[derive(Debug, Clone)]
pub struct FloorRecord {
    pub floor_id: String,
    pub location_id: String,
    pub floor_number: String,
    pub name: String,
}

/// 厕位。
#[derive(Debug, Clone)]
pub struct ToiletRecord {
    pub toilet_id: String,
    pub floor_id: String,
    pub toilet_number: String,
    pub qr_code: String,
    /// 保洁频率（小时），大于 0
    pub cleaning_frequency_hours: i32,
    pub last_cleaned_at: Option<DateTime<Utc>>,
    pub next_cleaning_due: Option<DateTime<Utc>>,
    pub status: ToiletStatus,
}

/// 厕位所在的楼层/位置/公司。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToiletPath {
    pub floor_name: String,
    pub floor_number: String,
    pub location_id: String,
    pub location_name: String,
    pub company_id: String,
}

impl ToiletPath {
    /// 展示用位置标签：`{位置名} - {楼层名}`。
    pub fn label(&self) -> String {
        format!("{} - {}", self.location_name, self.floor_name)
    }
}

/// 厕位及其层级路径。
#[derive(Debug, Clone)]
pub struct ToiletDetail {
    pub toilet: ToiletRecord,
    pub path: ToiletPath,
}

/// 用户反馈。
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub feedback_id: String,
    pub toilet_id: String,
    /// 1..=5
    pub rating: u8,
    pub issue_type: Option<IssueType>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 反馈及其厕位信息（列表与规则使用）。
#[derive(Debug, Clone)]
pub struct FeedbackDetail {
    pub feedback: FeedbackRecord,
    pub toilet_number: String,
    pub path: ToiletPath,
}

/// 保洁记录。
#[derive(Debug, Clone)]
pub struct CleaningLogRecord {
    pub log_id: String,
    pub toilet_id: String,
    pub staff_id: String,
    pub checklist: Vec<ChecklistItem>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub cleaned_at: DateTime<Utc>,
}

/// 保洁记录及其厕位、员工信息。
#[derive(Debug, Clone)]
pub struct CleaningLogDetail {
    pub log: CleaningLogRecord,
    pub toilet_number: String,
    pub path: ToiletPath,
    pub staff_name: Option<String>,
}

/// 写入保洁记录后的结果：记录本身 + 更新后的厕位排期。
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub log: CleaningLogRecord,
    pub toilet: ToiletRecord,
}

/// 员工。
#[derive(Debug, Clone)]
pub struct StaffRecord {
    pub staff_id: String,
    pub company_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub is_active: bool,
}

/// 厕位查询条件。
#[derive(Debug, Clone, Default)]
pub struct ToiletFilter {
    pub status: Option<ToiletStatus>,
    /// 仅保留 `next_cleaning_due < due_before` 的厕位
    pub due_before: Option<DateTime<Utc>>,
    /// 仅保留从未保洁或 `last_cleaned_at < not_cleaned_since` 的厕位
    pub not_cleaned_since: Option<DateTime<Utc>>,
}

impl ToiletFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ToiletStatus::Active),
            ..Self::default()
        }
    }

    pub fn matches(&self, toilet: &ToiletRecord) -> bool {
        if self.status.is_some_and(|status| status != toilet.status) {
            return false;
        }
        if let Some(due_before) = self.due_before {
            match toilet.next_cleaning_due {
                Some(due) if due < due_before => {}
                _ => return false,
            }
        }
        if let Some(since) = self.not_cleaned_since {
            if toilet.last_cleaned_at.is_some_and(|at| at >= since) {
                return false;
            }
        }
        true
    }
}

/// 反馈查询条件。`issue_types` 为空表示不限。
#[derive(Debug, Clone, Default)]
pub struct FeedbackFilter {
    pub range: Option<TimeRange>,
    pub max_rating: Option<u8>,
    pub issue_types: Vec<IssueType>,
    pub toilet_id: Option<String>,
}

impl FeedbackFilter {
    pub fn within(range: TimeRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    pub fn matches(&self, feedback: &FeedbackRecord) -> bool {
        if self.range.is_some_and(|range| !range.contains(feedback.created_at)) {
            return false;
        }
        if self.max_rating.is_some_and(|max| feedback.rating > max) {
            return false;
        }
        if !self.issue_types.is_empty()
            && !feedback
                .issue_type
                .is_some_and(|issue| self.issue_types.contains(&issue))
        {
            return false;
        }
        if let Some(toilet_id) = self.toilet_id.as_deref() {
            if feedback.toilet_id != toilet_id {
                return false;
            }
        }
        true
    }
}

/// 保洁记录查询条件。
#[derive(Debug, Clone, Default)]
pub struct CleaningLogFilter {
    pub range: Option<TimeRange>,
    pub toilet_id: Option<String>,
    pub staff_id: Option<String>,
}

impl CleaningLogFilter {
    pub fn within(range: TimeRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    pub fn matches(&self, log: &CleaningLogRecord) -> bool {
        if self.range.is_some_and(|range| !range.contains(log.cleaned_at)) {
            return false;
        }
        if self
            .toilet_id
            .as_deref()
            .is_some_and(|toilet_id| log.toilet_id != toilet_id)
        {
            return false;
        }
        if self
            .staff_id
            .as_deref()
            .is_some_and(|staff_id| log.staff_id != staff_id)
        {
            return false;
        }
        true
    }
}

/// 员工查询条件。
#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    pub company_id: Option<String>,
    pub active_only: bool,
}

/// 偏移分页。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    pub fn first(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }
}

/// 按评分分组的计数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCount {
    pub rating: u8,
    pub count: u64,
}

/// 按问题类型分组的计数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCount {
    pub issue_type: IssueType,
    pub count: u64,
}

/// 按厕位分组的计数及组内平均分。
#[derive(Debug, Clone, PartialEq)]
pub struct ToiletCount {
    pub toilet_id: String,
    pub count: u64,
    pub average_rating: f64,
}
